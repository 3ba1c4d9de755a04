use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Disabled,
    Unknown,
    Base,
    ProPlusMax,
}

impl Model {
    /// Resolve the variant from the raw settings values.
    ///
    /// Anything outside the known option set maps to `Unknown`, so a
    /// mistyped profile degrades to a skip comment instead of feeding the
    /// printer a stream it cannot render.
    pub fn from_settings(enabled: bool, model_text: &str) -> Self {
        let model = if !enabled {
            Self::Disabled
        } else {
            match model_text.trim().to_lowercase().as_str() {
                "base" => Self::Base,
                "pro" => Self::ProPlusMax,
                _ => Self::Unknown,
            }
        };
        debug!("selected printer model: {}", model.label());
        model
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::Unknown => "Unknown model",
            Self::Base => "Base",
            Self::ProPlusMax => "Pro/Plus/Max",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_wins_over_model_text() {
        assert_eq!(Model::from_settings(false, "pro"), Model::Disabled);
        assert_eq!(Model::from_settings(false, "base"), Model::Disabled);
        assert_eq!(Model::from_settings(false, "anything"), Model::Disabled);
    }

    #[test]
    fn known_models_parse_loosely() {
        assert_eq!(Model::from_settings(true, "base"), Model::Base);
        assert_eq!(Model::from_settings(true, "pro"), Model::ProPlusMax);
        assert_eq!(Model::from_settings(true, " PRO "), Model::ProPlusMax);
        assert_eq!(Model::from_settings(true, "Base"), Model::Base);
    }

    #[test]
    fn unrecognized_text_maps_to_unknown() {
        assert_eq!(Model::from_settings(true, "neptune 4"), Model::Unknown);
        assert_eq!(Model::from_settings(true, ""), Model::Unknown);
    }

    #[test]
    fn labels_match_settings_panel_values() {
        assert_eq!(Model::Disabled.label(), "Disabled");
        assert_eq!(Model::Unknown.label(), "Unknown model");
        assert_eq!(Model::Base.label(), "Base");
        assert_eq!(Model::ProPlusMax.label(), "Pro/Plus/Max");
    }
}
