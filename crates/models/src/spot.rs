use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// Serde impls for types that must be written as JSON objects.
///
/// Each type derives with `remote = "Self"`, which turns the derived code into
/// inherent `serialize`/`deserialize` functions. The derived decoder would also
/// take a struct laid out as a JSON array, so decoding goes through a map
/// first and anything else is rejected.
macro_rules! json_object {
    ($($ty:ident),* $(,)?) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $ty::serialize(self, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let map = Map::<String, Value>::deserialize(deserializer)?;
                $ty::deserialize(Value::Object(map)).map_err(de::Error::custom)
            }
        }
    )*};
}

json_object!(
    SpotCollection,
    SpotRecord,
    SpotFields,
    SpotPhoto,
    SpotPhotoThumbs,
    SpotThumbnail,
    SpotFieldsPatch,
);

/// The whole persisted document: `{ "records": [...], "offset": "" }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct SpotCollection {
    #[serde(default)]
    pub records: Vec<SpotRecord>,
    /// Pagination token carried over from the upstream export. Kept verbatim.
    #[serde(default)]
    pub offset: String,
}

/// One surf spot entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct SpotRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fields: SpotFields,
    #[serde(rename = "createdTime", default)]
    pub created_time: String,
}

impl SpotRecord {
    /// Checks the only structural requirement on an inbound record: a usable id.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.trim().is_empty() {
            return Err(ModelError::Validation("id must not be empty".into()));
        }
        Ok(())
    }
}

/// Descriptive attributes of a spot. Every field may be absent or `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct SpotFields {
    #[serde(rename = "Surf Break", default)]
    pub surf_break: Option<Vec<String>>,
    #[serde(rename = "Difficulty Level", default)]
    pub difficulty_level: Option<i64>,
    #[serde(rename = "Destination", default)]
    pub destination: Option<String>,
    #[serde(rename = "Geocode", default)]
    pub geocode: Option<String>,
    #[serde(rename = "Influencers", default)]
    pub influencers: Option<Vec<String>>,
    #[serde(rename = "Magic Seaweed Link", default)]
    pub magic_seaweed_link: Option<String>,
    #[serde(rename = "Photos", default)]
    pub photos: Option<Vec<SpotPhoto>>,
    #[serde(rename = "Peak Surf Season Begins", default)]
    pub peak_surf_season_begins: Option<String>,
    #[serde(rename = "Destination State/Country", default)]
    pub destination_state_country: Option<String>,
    #[serde(rename = "Peak Surf Season Ends", default)]
    pub peak_surf_season_ends: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
#[serde(default)]
pub struct SpotPhoto {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub thumbnails: SpotPhotoThumbs,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
#[serde(default)]
pub struct SpotPhotoThumbs {
    pub small: SpotThumbnail,
    pub large: SpotThumbnail,
    pub full: SpotThumbnail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
#[serde(default)]
pub struct SpotThumbnail {
    pub url: String,
    pub width: i64,
    pub height: i64,
}

/// Body of a partial update. Only these three attributes can be changed in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct SpotFieldsPatch {
    #[serde(rename = "Surf Break", default)]
    pub surf_break: Option<Vec<String>>,
    #[serde(rename = "Photos", default)]
    pub photos: Option<Vec<SpotPhoto>>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
}

impl SpotFieldsPatch {
    /// Overwrite the provided attributes of `fields`.
    ///
    /// Lists replace the stored value whenever present, even when empty.
    /// `Address` is only taken when non-empty.
    pub fn apply_to(self, fields: &mut SpotFields) {
        if let Some(surf_break) = self.surf_break {
            fields.surf_break = Some(surf_break);
        }
        if let Some(photos) = self.photos {
            fields.photos = Some(photos);
        }
        if let Some(address) = self.address.filter(|a| !a.is_empty()) {
            fields.address = Some(address);
        }
    }
}
