//! Subcommands and the logged-in session they run against.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use netcup_dns_client::{DnsRecord, DnsRecordSet, DnsZone, NetcupClient, ResponseMessage};
use serde_json::Value;

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
pub enum Command {
    /// List all records of a zone
    Records { domain: String },
    /// Show the zone settings (TTL, serial, timers, DNSSEC)
    Zone { domain: String },
    /// Submit a record set read from a JSON file
    ///
    /// The file holds either an array of records or an object with a
    /// `dnsrecords` array. Records with an id are changed, records without
    /// one are created, `"deleterecord": true` removes them.
    Update {
        domain: String,
        #[arg(long, short, value_name = "FILE")]
        file: PathBuf,
    },
    /// Submit zone settings read from a JSON file
    UpdateZone {
        domain: String,
        #[arg(long, short, value_name = "FILE")]
        file: PathBuf,
    },
    /// Fetch messages about asynchronous jobs
    Poll {
        #[arg(long, short = 'n', default_value_t = 10)]
        count: u32,
    },
}

/// An open API session.
pub struct Session<'a> {
    pub client: &'a NetcupClient,
    pub customernumber: u64,
    pub apikey: &'a str,
    pub apisessionid: String,
    pub clientrequestid: &'a str,
}

impl Session<'_> {
    pub async fn logout(&self) -> Result<ResponseMessage> {
        Ok(self
            .client
            .logout(
                self.customernumber,
                self.apikey,
                &self.apisessionid,
                Some(self.clientrequestid),
            )
            .await?)
    }
}

impl Command {
    pub async fn execute(self, session: &Session<'_>) -> Result<ResponseMessage> {
        let Session {
            client,
            customernumber,
            apikey,
            apisessionid,
            clientrequestid,
        } = session;
        let request_id = Some(*clientrequestid);

        let response = match self {
            Self::Records { domain } => {
                client
                    .info_dns_records(&domain, *customernumber, apikey, apisessionid, request_id)
                    .await?
            }
            Self::Zone { domain } => {
                client
                    .info_dns_zone(&domain, *customernumber, apikey, apisessionid, request_id)
                    .await?
            }
            Self::Update { domain, file } => {
                let set = read_record_set(&file)?;
                tracing::info!("submitting {} record(s) for {domain}", set.len());
                client
                    .update_dns_records(
                        &domain,
                        *customernumber,
                        apikey,
                        apisessionid,
                        request_id,
                        &set,
                    )
                    .await?
            }
            Self::UpdateZone { domain, file } => {
                let zone = read_zone(&file)?;
                client
                    .update_dns_zone(
                        &domain,
                        *customernumber,
                        apikey,
                        apisessionid,
                        request_id,
                        &zone,
                    )
                    .await?
            }
            Self::Poll { count } => {
                client
                    .poll(count, *customernumber, apikey, apisessionid, request_id)
                    .await?
            }
        };
        Ok(response)
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn read_record_set(path: &Path) -> Result<DnsRecordSet> {
    parse_record_set(read_json(path)?)
}

fn read_zone(path: &Path) -> Result<DnsZone> {
    parse_zone(read_json(path)?)
}

fn parse_record_set(value: Value) -> Result<DnsRecordSet> {
    let set = match value {
        Value::Array(_) => DnsRecordSet::new(
            serde_json::from_value::<Vec<DnsRecord>>(value).context("invalid record list")?,
        ),
        Value::Object(_) => serde_json::from_value(value).context("invalid record set")?,
        other => bail!("expected a record list or set, got {other}"),
    };
    if set.is_empty() {
        bail!("record set is empty");
    }
    Ok(set)
}

fn parse_zone(value: Value) -> Result<DnsZone> {
    let zone: DnsZone = serde_json::from_value(value).context("invalid zone")?;
    if zone.name.is_empty() {
        bail!("zone name is missing");
    }
    Ok(zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcup_dns_client::RecordType;
    use serde_json::json;

    #[test]
    fn test_parse_record_array() {
        let set = parse_record_set(json!([
            {"hostname": "www", "type": "A", "destination": "192.0.2.1"},
            {"id": "17", "hostname": "old", "type": "TXT", "destination": "x", "deleterecord": true}
        ]))
        .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.dnsrecords[0].is_new());
        assert_eq!(set.dnsrecords[1].record_type, RecordType::Txt);
        assert!(set.dnsrecords[1].deleterecord);
    }

    #[test]
    fn test_parse_record_object() {
        let set = parse_record_set(json!({
            "dnsrecords": [{"hostname": "@", "type": "MX", "priority": 10, "destination": "mx.example.com"}]
        }))
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.dnsrecords[0].priority.as_deref(), Some("10"));
    }

    #[test]
    fn test_parse_record_rejects_empty_and_scalars() {
        assert!(parse_record_set(json!([])).is_err());
        assert!(parse_record_set(json!("www")).is_err());
    }

    #[test]
    fn test_parse_zone_requires_name() {
        assert!(parse_zone(json!({"ttl": 3600})).is_err());
        let zone = parse_zone(json!({"name": "example.com", "ttl": "3600"})).unwrap();
        assert_eq!(zone.ttl, Some(3600));
    }
}
