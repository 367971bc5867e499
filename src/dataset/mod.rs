pub mod reader;
pub mod records;
pub mod source;

pub use reader::RecordReader;
pub use records::{BusinessRecord, CheckinRecord, ReviewRecord, UserRecord};
pub use source::{DatasetSource, DirectorySource};

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dataset {
    Business,
    Review,
    User,
    Checkin,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Business,
        Dataset::Review,
        Dataset::User,
        Dataset::Checkin,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::Business => "yelp_academic_dataset_business.json",
            Dataset::Review => "yelp_academic_dataset_review.json",
            Dataset::User => "yelp_academic_dataset_user.json",
            Dataset::Checkin => "yelp_academic_dataset_checkin.json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Business => "business",
            Dataset::Review => "review",
            Dataset::User => "user",
            Dataset::Checkin => "checkin",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
