//! Data records of the service schema.

mod dns;
mod dnssec;
mod domain;
mod handle;
mod response;
mod slots;

pub use dns::{DnsRecord, DnsRecordSet, DnsZone, RecordType};
pub use dnssec::{DnssecEntries, DnssecEntry, DnssecType};
pub use domain::{
    ContactEntries, DomainObject, NameserverEntries, NameserverEntry, RegistryContacts,
    TopLevelDomainObject,
};
pub use handle::{HandleObject, OptionalHandleAttribute};
pub use response::{ClientRequestId, PollObject, ResponseMessage, ResponseStatus, SessionObject};
pub use slots::{DnssecSlots, NameserverSlots, SlotError, SlotLayout, SlotSet};
