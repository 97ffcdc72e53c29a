use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Declares an enum persisted as a lowercase text column.
///
/// Each variant is paired with its wire/database spelling, which is used for
/// serde, `Display`/`FromStr` and the diesel `Text` mapping alike.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
        #[diesel(sql_type = Text)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "Unrecognized {} value: {}",
                        stringify!($name),
                        other
                    )),
                }
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                s.parse::<$name>().map_err(Into::into)
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }
    };
}

text_enum! {
    pub enum UserRole {
        Admin => "admin",
        Resident => "resident",
    }
}

text_enum! {
    /// Registration lifecycle of a resident account.
    pub enum UserStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

text_enum! {
    pub enum ResidentType {
        Owner => "owner",
        Tenant => "tenant",
    }
}

text_enum! {
    pub enum ComplaintCategory {
        Maintenance => "maintenance",
        Security => "security",
        Cleanliness => "cleanliness",
        Parking => "parking",
        Noise => "noise",
        Plumbing => "plumbing",
        Electrical => "electrical",
        Other => "other",
    }
}

text_enum! {
    pub enum ComplaintStatus {
        Pending => "pending",
        InProgress => "in_progress",
        Resolved => "resolved",
        Closed => "closed",
    }
}

text_enum! {
    /// Shared by complaints and notices.
    pub enum Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

text_enum! {
    pub enum NoticeCategory {
        General => "general",
        Maintenance => "maintenance",
        Event => "event",
        Emergency => "emergency",
        Meeting => "meeting",
        Other => "other",
    }
}

text_enum! {
    pub enum VehicleType {
        Car => "car",
        Bike => "bike",
        Scooter => "scooter",
        Other => "other",
    }
}

text_enum! {
    /// Approval state shared by the vehicle workflow.
    pub enum ApprovalStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

text_enum! {
    pub enum Relation {
        Spouse => "spouse",
        Child => "child",
        Parent => "parent",
        Sibling => "sibling",
        Other => "other",
    }
}

text_enum! {
    pub enum NotificationType {
        Registration => "registration",
        Approval => "approval",
        Complaint => "complaint",
        Notice => "notice",
        Vehicle => "vehicle",
        General => "general",
    }
}

text_enum! {
    /// Kind of record a notification points at.
    pub enum EntityType {
        User => "user",
        Complaint => "complaint",
        Notice => "notice",
        Vehicle => "vehicle",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Default for NotificationType {
    fn default() -> Self {
        NotificationType::General
    }
}

impl ComplaintStatus {
    /// Statuses for which a resolution timestamp is kept.
    pub fn is_settled(&self) -> bool {
        matches!(self, ComplaintStatus::Resolved | ComplaintStatus::Closed)
    }
}
