use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A probeable provider feature.
///
/// The JSON spelling is the identifier itself (`"CanUseSRV"`), matching how
/// provider authors declare capabilities. `Doc*` variants are never declared
/// by drivers; they only exist as keys for documentation notes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    CanUseAlias,
    #[serde(rename = "CanUseSRV")]
    CanUseSrv,
    #[serde(rename = "CanUsePTR")]
    CanUsePtr,
    #[serde(rename = "CanUseCAA")]
    CanUseCaa,
    #[serde(rename = "CanUseTXTMulti")]
    CanUseTxtMulti,
    #[serde(rename = "CanUseTLSA")]
    CanUseTlsa,
    #[serde(rename = "CanUseSSHFP")]
    CanUseSshfp,
    #[serde(rename = "CanUseDS")]
    CanUseDs,
    CanGetZones,
    /// Negative capability: the provider rebuilds whole zones and so cannot
    /// honour NO_PURGE.
    #[serde(rename = "CantUseNOPURGE")]
    CantUseNoPurge,
    DocOfficiallySupported,
    DocDualHost,
    DocCreateDomains,
}

impl Capability {
    pub const ALL: [Capability; 13] = [
        Capability::CanUseAlias,
        Capability::CanUseSrv,
        Capability::CanUsePtr,
        Capability::CanUseCaa,
        Capability::CanUseTxtMulti,
        Capability::CanUseTlsa,
        Capability::CanUseSshfp,
        Capability::CanUseDs,
        Capability::CanGetZones,
        Capability::CantUseNoPurge,
        Capability::DocOfficiallySupported,
        Capability::DocDualHost,
        Capability::DocCreateDomains,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::CanUseAlias => "CanUseAlias",
            Capability::CanUseSrv => "CanUseSRV",
            Capability::CanUsePtr => "CanUsePTR",
            Capability::CanUseCaa => "CanUseCAA",
            Capability::CanUseTxtMulti => "CanUseTXTMulti",
            Capability::CanUseTlsa => "CanUseTLSA",
            Capability::CanUseSshfp => "CanUseSSHFP",
            Capability::CanUseDs => "CanUseDS",
            Capability::CanGetZones => "CanGetZones",
            Capability::CantUseNoPurge => "CantUseNOPURGE",
            Capability::DocOfficiallySupported => "DocOfficiallySupported",
            Capability::DocDualHost => "DocDualHost",
            Capability::DocCreateDomains => "DocCreateDomains",
        }
    }

    /// Documentation-only keys cannot be probed.
    pub fn is_documentation(&self) -> bool {
        matches!(
            self,
            Capability::DocOfficiallySupported
                | Capability::DocDualHost
                | Capability::DocCreateDomains
        )
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hand-written statement about one provider/capability pair.
///
/// A present note always wins over the probe, even when `has_feature` is
/// unset; that state means the maintainers have not decided yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_feature: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl OverrideNote {
    pub fn new(has_feature: Option<bool>, comment: Option<&str>) -> Self {
        Self {
            has_feature,
            comment: comment.map(str::to_string),
        }
    }
}

pub type DocumentationNotes = BTreeMap<Capability, OverrideNote>;
