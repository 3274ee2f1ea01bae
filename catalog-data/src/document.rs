use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::id::ObjectId;

/// A record stored in its own named collection.
///
/// Schema constraints are declared with `garde` attributes and checked on
/// every write.
///
/// ```ignore
/// impl Document for Genre {
///     const COLLECTION: &'static str = "genres";
///     fn id(&self) -> ObjectId { self.id }
///     fn set_id(&mut self, id: ObjectId) { self.id = id; }
/// }
/// ```
pub trait Document:
    Serialize + DeserializeOwned + garde::Validate<Context = ()> + Clone + Send + Sync + 'static
{
    const COLLECTION: &'static str;

    fn id(&self) -> ObjectId;

    fn set_id(&mut self, id: ObjectId);
}
