use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dnssec::{DnssecEntries, DnssecType};
use super::slots::{NameserverSlots, SlotSet};
use crate::utils::{datetime, wire};

/// One nameserver. The host name is mandatory, addresses are glue records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameserverEntry {
    #[serde(default, deserialize_with = "wire::string")]
    pub hostname: String,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ipv4: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ipv6: Option<String>,
}

impl NameserverEntry {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ipv4: None,
            ipv6: None,
        }
    }
}

/// Nameservers of a domain in slots `nameserver1..8`. The registry needs at
/// least two different ones.
pub type NameserverEntries = SlotSet<NameserverEntry, NameserverSlots, 8>;

/// Ids of the contact handles assigned to a domain, per role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntries {
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ownerc: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub adminc: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub techc: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub zonec: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub billingc: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub onsitec: Option<String>,
}

/// Handle names at the registry (`ABC12365445`, `DENIC-415-R-1351`), per role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryContacts {
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ownerc: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub adminc: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub techc: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub zonec: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub billingc: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub onsitec: Option<String>,
}

/// A registered domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainObject {
    #[serde(default, deserialize_with = "wire::string")]
    pub domainname: String,
    #[serde(default, skip_serializing_if = "NameserverEntries::is_empty")]
    pub nameserverentry: NameserverEntries,
    #[serde(
        default,
        deserialize_with = "wire::opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub customernumber: Option<u64>,
    #[serde(
        default,
        deserialize_with = "wire::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignedcontacts: Option<ContactEntries>,
    /// An owner change waits for confirmation.
    #[serde(default, deserialize_with = "wire::bool_or_false")]
    pub ownerchangerunning: bool,
    /// A cancellation waits for confirmation.
    #[serde(default, deserialize_with = "wire::bool_or_false")]
    pub cancellationrunning: bool,
    /// `YYYY-MM-DD`
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nextbilling: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub runtimemonths: Option<u32>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub lastupdate: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub domaincreated: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub deletiondate: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub authcode: Option<String>,
    /// `inclusive` or `additional`.
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub registrycontacts: Option<RegistryContacts>,
    #[serde(
        default,
        deserialize_with = "wire::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub priceperruntime: Option<f64>,
    #[serde(
        default,
        deserialize_with = "wire::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub dnssectype: Option<DnssecType>,
    #[serde(default, skip_serializing_if = "DnssecEntries::is_empty")]
    pub dnssecentries: DnssecEntries,
}

impl DomainObject {
    pub fn next_billing_date(&self) -> Option<NaiveDate> {
        self.nextbilling.as_deref().and_then(datetime::parse_date)
    }
}

/// Pricing and runtime of a top-level domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopLevelDomainObject {
    #[serde(default, deserialize_with = "wire::string")]
    pub topleveldomainname: String,
    #[serde(
        default,
        deserialize_with = "wire::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub priceperruntime: Option<f64>,
    #[serde(
        default,
        deserialize_with = "wire::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub setupfee: Option<f64>,
    #[serde(
        default,
        deserialize_with = "wire::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub runtimemonths: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn domain_from_wire() {
        let domain: DomainObject = serde_json::from_value(json!({
            "domainname": "example.com",
            "nameserverentry": {
                "nameserver1": {"hostname": "root-dns.netcup.net", "ipv4": "", "ipv6": ""},
                "nameserver2": {"hostname": "second-dns.netcup.net"},
                "nameserver3": ""
            },
            "customernumber": "12345",
            "assignedcontacts": {"ownerc": "100", "adminc": "101"},
            "ownerchangerunning": "FALSE",
            "cancellationrunning": "true",
            "nextbilling": "2025-06-01",
            "runtimemonths": "12",
            "state": "inclusive",
            "registrycontacts": "",
            "priceperruntime": "9.84",
            "dnssectype": "digest",
            "dnssecentries": ""
        }))
        .unwrap();

        assert_eq!(domain.nameserverentry.len(), 2);
        let ns1 = domain.nameserverentry.get(1).unwrap();
        assert_eq!(ns1.hostname, "root-dns.netcup.net");
        assert_eq!(ns1.ipv4, None);
        assert_eq!(domain.customernumber, Some(12345));
        let contacts = domain.assignedcontacts.as_ref().unwrap();
        assert_eq!(contacts.adminc.as_deref(), Some("101"));
        assert!(!domain.ownerchangerunning);
        assert!(domain.cancellationrunning);
        assert_eq!(domain.registrycontacts, None);
        assert_eq!(domain.priceperruntime, Some(9.84));
        assert_eq!(domain.dnssectype, Some(DnssecType::Digest));
        assert!(domain.dnssecentries.is_empty());
        assert_eq!(
            domain.next_billing_date(),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
    }

    #[test]
    fn nameservers_serialize_as_numbered_fields() {
        let mut domain = DomainObject {
            domainname: "example.com".into(),
            ..Default::default()
        };
        domain
            .nameserverentry
            .push(NameserverEntry::new("ns1.example.net"))
            .unwrap();
        domain
            .nameserverentry
            .set(3, NameserverEntry::new("ns3.example.net"))
            .unwrap();

        let value = serde_json::to_value(&domain).unwrap();
        assert_eq!(
            value["nameserverentry"],
            json!({
                "nameserver1": {"hostname": "ns1.example.net"},
                "nameserver3": {"hostname": "ns3.example.net"}
            })
        );
        assert!(value.get("dnssecentries").is_none());
    }

    #[test]
    fn tld_info() {
        let tld: TopLevelDomainObject = serde_json::from_value(json!({
            "topleveldomainname": "de",
            "priceperruntime": 5.04,
            "setupfee": "0.00",
            "runtimemonths": 12
        }))
        .unwrap();
        assert_eq!(tld.setupfee, Some(0.0));
        assert_eq!(tld.runtimemonths, Some(12));
    }
}
