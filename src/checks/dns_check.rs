use crate::checks::{CheckError, Checker};
use crate::task::Task;
use async_trait::async_trait;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use log::debug;
use std::fmt;

/// The record kinds that all need to resolve for a hostname to count as reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Address,
    CanonicalName,
    NameServer,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Address,
        RecordKind::CanonicalName,
        RecordKind::NameServer,
    ];

    fn label(&self) -> &'static str {
        match self {
            RecordKind::Address => "A/AAAA",
            RecordKind::CanonicalName => "CNAME",
            RecordKind::NameServer => "NS",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Answers how many records of a kind exist for a hostname.
#[async_trait]
pub trait NameLookup: Send + Sync {
    async fn count(&self, hostname: &str, kind: RecordKind) -> Result<usize, CheckError>;
}

/// Queries the resolvers from the host's system configuration. Every query gets its own
/// resolver instance, so no state is carried between lookups or tasks.
pub struct SystemLookup;

#[async_trait]
impl NameLookup for SystemLookup {
    async fn count(&self, hostname: &str, kind: RecordKind) -> Result<usize, CheckError> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf()?;
        let count = match kind {
            RecordKind::Address => resolver.lookup_ip(hostname).await?.iter().count(),
            RecordKind::CanonicalName => resolver
                .lookup(hostname, RecordType::CNAME)
                .await?
                .iter()
                .count(),
            RecordKind::NameServer => resolver.ns_lookup(hostname).await?.iter().count(),
        };
        Ok(count)
    }
}

/// Succeeds only when the address, canonical name and name server lookups all return at least
/// one record. A host with plain A records and no CNAME alias is therefore not reached.
pub struct DnsCheck {
    name: &'static str,
    lookup: Box<dyn NameLookup>,
}

impl DnsCheck {
    pub fn new() -> Self {
        Self::with_lookup(Box::new(SystemLookup))
    }

    pub fn with_lookup(lookup: Box<dyn NameLookup>) -> Self {
        Self {
            name: "DnsCheck",
            lookup,
        }
    }
}

#[async_trait]
impl Checker for DnsCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self, task: &Task) -> Result<(), CheckError> {
        for kind in RecordKind::ALL {
            let count = self.lookup.count(&task.hostname, kind).await?;
            debug!("{} has {} {} records", task.hostname, count, kind);
            if count == 0 {
                return Err(CheckError::EmptyAnswer(kind.label()));
            }
        }
        Ok(())
    }
}
