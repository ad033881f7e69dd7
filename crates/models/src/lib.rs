//! Record types for the surf spot collection, as persisted in `spot.json`.

pub mod errors;
pub mod spot;

pub use spot::{
    SpotCollection, SpotFields, SpotFieldsPatch, SpotPhoto, SpotPhotoThumbs, SpotRecord,
    SpotThumbnail,
};
