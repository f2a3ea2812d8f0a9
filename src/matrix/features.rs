use crate::providers::{Capability, ProviderKind};
use serde::Serialize;

/// How one matrix row is filled in for a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Only a documentation note can produce an entry; no note means n/a.
    Documented(Capability),
    /// A note wins; otherwise the capability probe decides. Always present.
    Probed(Capability),
    /// Like `Probed`, but the capability is phrased negatively, so the
    /// displayed value is the negated probe.
    InvertedProbe(Capability),
    /// Membership in the registrar or DNS-provider registry. Notes are ignored.
    ProviderKind(ProviderKind),
}

impl Resolution {
    /// The note key consulted for this row, if any.
    pub fn note_key(&self) -> Option<Capability> {
        match self {
            Resolution::Documented(cap)
            | Resolution::Probed(cap)
            | Resolution::InvertedProbe(cap) => Some(*cap),
            Resolution::ProviderKind(_) => None,
        }
    }
}

/// One row of the matrix: display name, tooltip, and how it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FeatureDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub resolution: Resolution,
}

/// Matrix rows in display order.
pub const FEATURES: &[FeatureDefinition] = &[
    FeatureDefinition {
        name: "Official Support",
        description: "This means the provider is actively used at Stack Exchange, bugs are more likely to be fixed, and failing integration tests will block a release. See below for details",
        resolution: Resolution::Documented(Capability::DocOfficiallySupported),
    },
    FeatureDefinition {
        name: "Registrar",
        description: "The provider has registrar capabilities to set nameservers for zones",
        resolution: Resolution::ProviderKind(ProviderKind::Registrar),
    },
    FeatureDefinition {
        name: "DNS Provider",
        description: "Can manage and serve DNS zones",
        resolution: Resolution::ProviderKind(ProviderKind::DnsProvider),
    },
    FeatureDefinition {
        name: "ALIAS",
        description: "Provider supports some kind of ALIAS, ANAME or flattened CNAME record type",
        resolution: Resolution::Probed(Capability::CanUseAlias),
    },
    FeatureDefinition {
        name: "SRV",
        description: "Driver has explicitly implemented SRV record management",
        resolution: Resolution::Probed(Capability::CanUseSrv),
    },
    FeatureDefinition {
        name: "PTR",
        description: "Provider supports adding PTR records for reverse lookup zones",
        resolution: Resolution::Probed(Capability::CanUsePtr),
    },
    FeatureDefinition {
        name: "CAA",
        description: "Provider can manage CAA records",
        resolution: Resolution::Probed(Capability::CanUseCaa),
    },
    FeatureDefinition {
        name: "dual host",
        description: "This provider is recommended for use in 'dual hosting' scenarios. Usually this means the provider allows full control over the apex NS records",
        resolution: Resolution::Documented(Capability::DocDualHost),
    },
    FeatureDefinition {
        name: "create-domains",
        description: "This means the provider can automatically create domains that do not currently exist on your account. The 'dnscontrol create-domains' command will initialize any missing domains",
        resolution: Resolution::Documented(Capability::DocCreateDomains),
    },
    // Displayed positively ("NO_PURGE works") while the driver declares the
    // negative CantUseNOPURGE; see Resolution::InvertedProbe.
    FeatureDefinition {
        name: "no_purge",
        description: "indicates you can use NO_PURGE macro to prevent deleting records not managed by dnscontrol. A few providers that generate the entire zone from scratch have a problem implementing this.",
        resolution: Resolution::InvertedProbe(Capability::CantUseNoPurge),
    },
];

/// Look up a row by display name.
pub fn feature(name: &str) -> Option<&'static FeatureDefinition> {
    FEATURES.iter().find(|def| def.name == name)
}
