use models::{SpotCollection, SpotFieldsPatch, SpotRecord};

/// In-memory operations over one loaded collection.
///
/// Lookups scan linearly and the first record with a matching id wins.
/// An empty id never matches, even against a record whose id is empty.
pub struct SpotRepository {
    collection: SpotCollection,
}

impl SpotRepository {
    pub fn new(collection: SpotCollection) -> Self {
        Self { collection }
    }

    pub fn into_collection(self) -> SpotCollection {
        self.collection
    }

    fn position(&self, id: &str) -> Option<usize> {
        if id.is_empty() {
            return None;
        }
        self.collection.records.iter().position(|r| r.id == id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&SpotRecord> {
        self.position(id).map(|i| &self.collection.records[i])
    }

    /// Add to the end. Ids are not checked for uniqueness.
    pub fn append(&mut self, record: SpotRecord) {
        self.collection.records.push(record);
    }

    /// Apply `patch` to the first record with `id`; returns whether one matched.
    pub fn update_fields(&mut self, id: &str, patch: SpotFieldsPatch) -> bool {
        match self.position(id) {
            Some(i) => {
                patch.apply_to(&mut self.collection.records[i].fields);
                true
            }
            None => false,
        }
    }

    /// Remove the first record with `id`, keeping the order of the rest.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(i) => {
                self.collection.records.remove(i);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::SpotFields;

    fn spot(id: &str, destination: &str) -> SpotRecord {
        SpotRecord {
            id: id.into(),
            fields: SpotFields {
                destination: Some(destination.into()),
                surf_break: Some(vec!["Reef Break".into()]),
                difficulty_level: Some(3),
                address: Some(format!("{destination} beach")),
                ..Default::default()
            },
            created_time: "2018-05-31T00:16:16.000Z".into(),
        }
    }

    fn repo() -> SpotRepository {
        SpotRepository::new(SpotCollection {
            records: vec![spot("a", "Pipeline"), spot("b", "Uluwatu"), spot("c", "Nazaré")],
            offset: String::new(),
        })
    }

    #[test]
    fn find_by_id_hits_and_misses() {
        let repo = repo();
        assert_eq!(repo.find_by_id("b").map(|r| r.fields.destination.as_deref()), Some(Some("Uluwatu")));
        assert!(repo.find_by_id("zzz").is_none());
    }

    #[test]
    fn duplicate_ids_resolve_to_first_match() {
        let mut repo = repo();
        repo.append(spot("a", "Mavericks"));
        assert_eq!(repo.collection.records.len(), 4);
        assert_eq!(repo.find_by_id("a").and_then(|r| r.fields.destination.as_deref()), Some("Pipeline"));
    }

    #[test]
    fn empty_id_never_matches() {
        let mut repo = repo();
        repo.append(spot("", "Nameless"));
        assert!(repo.find_by_id("").is_none());
        assert!(!repo.update_fields("", SpotFieldsPatch { address: Some("X".into()), ..Default::default() }));
        assert!(!repo.remove_by_id(""));
        assert_eq!(repo.collection.records.len(), 4);
    }

    #[test]
    fn append_goes_last() {
        let mut repo = repo();
        let r = spot("d", "Jeffreys Bay");
        repo.append(r.clone());
        assert_eq!(repo.into_collection().records.last(), Some(&r));
    }

    #[test]
    fn update_address_leaves_other_fields() {
        let mut repo = repo();
        let before = repo.find_by_id("b").cloned().expect("b");

        assert!(repo.update_fields("b", SpotFieldsPatch { address: Some("X".into()), ..Default::default() }));
        let after = repo.find_by_id("b").cloned().expect("b");
        assert_eq!(after.fields.address.as_deref(), Some("X"));
        assert_eq!(
            SpotFields { address: before.fields.address.clone(), ..after.fields.clone() },
            before.fields
        );

        assert!(repo.update_fields("b", SpotFieldsPatch { address: Some(String::new()), ..Default::default() }));
        assert_eq!(repo.find_by_id("b").and_then(|r| r.fields.address.as_deref()), Some("X"));
    }

    #[test]
    fn update_unknown_id_reports_miss() {
        let mut repo = repo();
        assert!(!repo.update_fields("nope", SpotFieldsPatch { address: Some("X".into()), ..Default::default() }));
    }

    #[test]
    fn remove_keeps_order_of_rest() {
        let mut repo = repo();
        assert!(repo.remove_by_id("b"));
        let ids: Vec<&str> = repo.collection.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert!(repo.find_by_id("b").is_none());

        assert!(!repo.remove_by_id("b"));
        assert_eq!(repo.collection.records.len(), 2);
    }
}
