use serde::{Deserialize, Serialize};

/// Channel carrying the derived prediction.
pub const STROKE_VOLUME: &str = "stroke_volume";

/// A channel known at configuration time, with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub id: String,
    pub name: String,
}

impl ChannelSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Vitals monitor channels plus the prediction, in display order.
pub fn default_channels() -> Vec<ChannelSpec> {
    vec![
        ChannelSpec::new("Solar8000/HR", "Heart Rate"),
        ChannelSpec::new("Solar8000/RR_CO2", "CO₂ Resp. Rate"),
        ChannelSpec::new("Solar8000/NIBP_MBP", "NIBP Mean BP"),
        ChannelSpec::new("Solar8000/PLETH_SPO2", "SpO₂"),
        ChannelSpec::new("Solar8000/PLETH_HR", "Pleth HR"),
        ChannelSpec::new("EV1000/ART_MBP", "Art. Mean BP"),
        ChannelSpec::new(STROKE_VOLUME, "Stroke Volume"),
    ]
}

/// Ordered set of channels used for display.
///
/// Merging never consults the catalog; rows may carry channels it does not
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCatalog {
    channels: Vec<ChannelSpec>,
}

impl ChannelCatalog {
    pub fn new(channels: Vec<ChannelSpec>) -> Self {
        Self { channels }
    }

    pub fn channels(&self) -> &[ChannelSpec] {
        &self.channels
    }

    pub fn contains(&self, id: &str) -> bool {
        self.channels.iter().any(|c| c.id == id)
    }

    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.channels
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or(id)
    }
}

impl Default for ChannelCatalog {
    fn default() -> Self {
        Self::new(default_channels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let catalog = ChannelCatalog::default();

        assert_eq!(catalog.channels().len(), 7);
        assert_eq!(catalog.channels()[0].id, "Solar8000/HR");
        assert_eq!(catalog.channels()[6].id, STROKE_VOLUME);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let catalog = ChannelCatalog::default();

        assert_eq!(catalog.display_name("Solar8000/PLETH_SPO2"), "SpO₂");
        assert_eq!(catalog.display_name("BIS/BIS"), "BIS/BIS");
        assert!(!catalog.contains("BIS/BIS"));
    }
}
