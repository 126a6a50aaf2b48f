//! Group display model

use serde::Serialize;
use tabled::Tabled;

use super::NONE;
use crate::client::models::GraphGroup;

/// Group display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct GroupDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DESCRIPTOR")]
    pub descriptor: String,

    #[tabled(rename = "ORIGIN")]
    pub origin: String,

    #[tabled(rename = "ORIGIN ID")]
    pub origin_id: String,
}

impl From<GraphGroup> for GroupDisplay {
    fn from(group: GraphGroup) -> Self {
        Self {
            name: group.display_name,
            descriptor: group.descriptor,
            origin: group.origin.unwrap_or_else(|| NONE.to_string()),
            origin_id: group.origin_id.unwrap_or_else(|| NONE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::GroupBuilder;

    #[test]
    fn test_group_display_fills_missing_origin_id() {
        let display = GroupDisplay::from(GroupBuilder::new("Readers").build());

        assert_eq!(display.name, "Readers");
        assert_eq!(display.descriptor, "vssgp.Readers");
        assert_eq!(display.origin, "vsts");
        assert_eq!(display.origin_id, "--");
    }
}
