use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// The nine fixed waste classes.
///
/// Declaration order is significant: it is the order in which categories are
/// scored and the priority used to break an exact score tie (earlier wins).
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, EnumCount, VariantNames, IntoStaticStr,
    PartialEq, Eq, Hash, PartialOrd, Ord
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WasteCategory {
    RecyclablePaper,
    RecyclablePlastic,
    RecyclableGlass,
    RecyclableMetal,
    OrganicFood,
    OrganicYard,
    Hazardous,
    #[serde(rename = "e_waste")]
    #[strum(serialize = "e_waste")]
    EWaste,
    LandfillGeneral,
}

/// Coarse collection stream a category is routed to.
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WasteStream {
    Recyclable,
    Organic,
    Special,
    Landfill,
}

impl WasteCategory {
    /// Residual class used whenever a lookup misses
    pub const FALLBACK: WasteCategory = WasteCategory::LandfillGeneral;

    /// Stable snake_case key, e.g. `"recyclable_paper"`
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Position in scoring/priority order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Legacy numeric class ids used by older clients.
    ///
    /// This numbering is not the scoring order: landfill sits at 6. Unknown
    /// ids resolve to [`WasteCategory::FALLBACK`].
    pub fn from_class_index(class_index: usize) -> Self {
        match class_index {
            0 => Self::RecyclablePaper,
            1 => Self::RecyclablePlastic,
            2 => Self::RecyclableGlass,
            3 => Self::RecyclableMetal,
            4 => Self::OrganicFood,
            5 => Self::OrganicYard,
            6 => Self::LandfillGeneral,
            7 => Self::Hazardous,
            8 => Self::EWaste,
            _ => Self::FALLBACK,
        }
    }

    pub fn stream(self) -> WasteStream {
        match self {
            Self::RecyclablePaper
            | Self::RecyclablePlastic
            | Self::RecyclableGlass
            | Self::RecyclableMetal => WasteStream::Recyclable,
            Self::OrganicFood | Self::OrganicYard => WasteStream::Organic,
            Self::Hazardous | Self::EWaste => WasteStream::Special,
            Self::LandfillGeneral => WasteStream::Landfill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_keys_round_trip_through_strum_and_serde() {
        for category in WasteCategory::iter() {
            let parsed = WasteCategory::from_str(category.key()).unwrap();
            assert_eq!(parsed, category);

            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
        assert_eq!(WasteCategory::EWaste.key(), "e_waste");
        assert_eq!(WasteCategory::LandfillGeneral.to_string(), "landfill_general");
    }

    #[test]
    fn test_priority_order_matches_declaration() {
        let order: Vec<WasteCategory> = WasteCategory::iter().collect();
        assert_eq!(order.len(), WasteCategory::COUNT);
        assert_eq!(order[0], WasteCategory::RecyclablePaper);
        assert_eq!(order[8], WasteCategory::LandfillGeneral);
        for (i, category) in order.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_legacy_class_index() {
        assert_eq!(WasteCategory::from_class_index(6), WasteCategory::LandfillGeneral);
        assert_eq!(WasteCategory::from_class_index(8), WasteCategory::EWaste);
        assert_eq!(WasteCategory::from_class_index(42), WasteCategory::LandfillGeneral);
    }

    #[test]
    fn test_streams() {
        assert_eq!(WasteCategory::RecyclableGlass.stream(), WasteStream::Recyclable);
        assert_eq!(WasteCategory::OrganicYard.stream(), WasteStream::Organic);
        assert_eq!(WasteCategory::EWaste.stream(), WasteStream::Special);
        assert_eq!(WasteCategory::LandfillGeneral.stream(), WasteStream::Landfill);
    }
}
