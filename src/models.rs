pub mod doubt;
pub mod progress;
pub mod student;
pub mod subject;
pub mod work_item;

use serde::{Serialize, de::DeserializeOwned};

use crate::store::Collection;

pub use doubt::{Doubt, DoubtStatus};
pub use progress::{ChapterProgress, EntryKind, ProgressEntry};
pub use student::Student;
pub use subject::{StudentSubjects, SubjectChapter, SubjectData};
pub use work_item::{Priority, WorkItem, WorkSource, WorkStatus};

/// Dates travel as "YYYY-MM-DD" strings in stored documents. A full
/// timestamp such as "2025-01-10T08:00:00.000Z" is read by its date part.
pub(crate) mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    fn parse(text: &str) -> Result<Date, time::error::Parse> {
        let day = text.split_once('T').map_or(text, |(day, _)| day);
        Date::parse(day, FORMAT)
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
        use time::Date;

        use super::{FORMAT, parse};

        pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => {
                    let text = date.format(FORMAT).map_err(S::Error::custom)?;
                    serializer.serialize_some(&text)
                }
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|text| parse(&text).map_err(D::Error::custom))
                .transpose()
        }
    }
}

/// An entity stored as one document of a collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Field that carries the document id inside the stored body.
    const ID_FIELD: &'static str = "id";

    fn id(&self) -> &str;
}
