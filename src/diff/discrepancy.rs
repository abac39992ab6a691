//! Discrepancy records produced by the diff engine.

use serde::Serialize;
use std::fmt;

/// Which of the two compared configurations something refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The first archive on the command line.
    First,
    /// The second archive on the command line.
    Second,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::First => "first",
            Self::Second => "second",
        };
        write!(f, "{s}")
    }
}

/// Category of a discrepancy, used for summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// A virtual server exists in only one configuration.
    MissingServer,
    /// An attribute exists in only one configuration.
    MissingAttribute,
    /// An attribute has different values.
    ValueDiffers,
}

impl fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MissingServer => "missing virtual server",
            Self::MissingAttribute => "missing attribute",
            Self::ValueDiffers => "differing value",
        };
        write!(f, "{s}")
    }
}

/// A single difference between two parsed configurations.
///
/// The [`fmt::Display`] output is the line written to the results file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    /// A virtual server is absent from one side.
    MissingServer {
        /// Virtual server name.
        server: String,
        /// Side lacking the virtual server.
        missing_in: Side,
    },
    /// An attribute of a shared virtual server is absent from one side.
    MissingAttribute {
        /// Virtual server name.
        server: String,
        /// Attribute name.
        attribute: String,
        /// Side lacking the attribute.
        missing_in: Side,
    },
    /// An attribute of a shared virtual server has different values.
    ValueDiffers {
        /// Virtual server name.
        server: String,
        /// Attribute name.
        attribute: String,
        /// Value in the first configuration.
        first: String,
        /// Value in the second configuration.
        second: String,
    },
}

impl Discrepancy {
    /// Returns the category of this discrepancy.
    #[must_use]
    pub const fn kind(&self) -> DiscrepancyKind {
        match self {
            Self::MissingServer { .. } => DiscrepancyKind::MissingServer,
            Self::MissingAttribute { .. } => DiscrepancyKind::MissingAttribute,
            Self::ValueDiffers { .. } => DiscrepancyKind::ValueDiffers,
        }
    }

    /// Returns the virtual server this discrepancy is about.
    #[must_use]
    pub fn server(&self) -> &str {
        match self {
            Self::MissingServer { server, .. }
            | Self::MissingAttribute { server, .. }
            | Self::ValueDiffers { server, .. } => server,
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingServer { server, missing_in } => write!(
                f,
                "Virtual server '{server}' is missing in the {missing_in} configuration."
            ),
            Self::MissingAttribute {
                server,
                attribute,
                missing_in,
            } => write!(
                f,
                "Attribute '{attribute}' in virtual server '{server}' is missing in the {missing_in} configuration."
            ),
            Self::ValueDiffers {
                server,
                attribute,
                first,
                second,
            } => write!(
                f,
                "Attribute '{attribute}' in virtual server '{server}' differs: '{first}' vs '{second}'."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_messages() {
        let missing = Discrepancy::MissingServer {
            server: String::from("vs2"),
            missing_in: Side::First,
        };
        assert_eq!(
            missing.to_string(),
            "Virtual server 'vs2' is missing in the first configuration."
        );

        let attr = Discrepancy::MissingAttribute {
            server: String::from("vs1"),
            attribute: String::from("rules"),
            missing_in: Side::Second,
        };
        assert_eq!(
            attr.to_string(),
            "Attribute 'rules' in virtual server 'vs1' is missing in the second configuration."
        );

        let differs = Discrepancy::ValueDiffers {
            server: String::from("vs1"),
            attribute: String::from("pool"),
            first: String::from("poolA"),
            second: String::from("poolB"),
        };
        assert_eq!(
            differs.to_string(),
            "Attribute 'pool' in virtual server 'vs1' differs: 'poolA' vs 'poolB'."
        );
        assert_eq!(differs.kind(), DiscrepancyKind::ValueDiffers);
        assert_eq!(differs.server(), "vs1");
    }

    #[test]
    fn test_json_shape() {
        let missing = Discrepancy::MissingServer {
            server: String::from("vs2"),
            missing_in: Side::Second,
        };
        let json = serde_json::to_value(&missing).unwrap();
        assert_eq!(json["kind"], "missing_server");
        assert_eq!(json["server"], "vs2");
        assert_eq!(json["missing_in"], "second");
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::First.opposite(), Side::Second);
        assert_eq!(Side::Second.opposite(), Side::First);
    }
}
