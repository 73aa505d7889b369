//! Remote address predicate.

use std::net::IpAddr;
use std::str::FromStr;

use crate::predicates::value_and_args;
use crate::routing::context::RequestContext;
use crate::routing::predicate::{BoxPredicate, InvalidArgs, Predicate, PredicateFactory};

/// An address block such as `10.0.0.0/8`. A bare address is a full-length block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpNet {
    addr: IpAddr,
    prefix: u8,
}

impl IpNet {
    pub fn contains(&self, ip: IpAddr) -> bool {
        match (self.addr, ip) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                let mask = u32::MAX.checked_shl(32 - u32::from(self.prefix)).unwrap_or(0);
                u32::from(net) & mask == u32::from(ip) & mask
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                let mask = u128::MAX.checked_shl(128 - u32::from(self.prefix)).unwrap_or(0);
                u128::from(net) & mask == u128::from(ip) & mask
            }
            _ => false,
        }
    }
}

impl FromStr for IpNet {
    type Err = InvalidArgs;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidArgs::new(format!("invalid address or CIDR {:?}", s));
        let (addr, prefix) = match s.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (s, None),
        };
        let addr: IpAddr = addr.parse().map_err(|_| invalid())?;
        let max = if addr.is_ipv4() { 32 } else { 128 };
        let prefix = match prefix {
            Some(p) => p.parse::<u8>().map_err(|_| invalid())?,
            None => max,
        };
        if prefix > max {
            return Err(invalid());
        }
        Ok(Self { addr, prefix })
    }
}

#[derive(Debug, Clone)]
pub struct RemoteAddrPredicate {
    sources: Vec<IpNet>,
}

impl Predicate for RemoteAddrPredicate {
    fn test(&self, ctx: &RequestContext) -> bool {
        match ctx.remote_addr() {
            Some(addr) => {
                let ip = addr.ip().to_canonical();
                self.sources.iter().any(|net| net.contains(ip))
            }
            None => false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RemoteAddrPredicateFactory;

impl PredicateFactory for RemoteAddrPredicateFactory {
    fn apply(&self, value: &str, args: &[String]) -> Result<BoxPredicate, InvalidArgs> {
        let sources = value_and_args(value, args)
            .map(IpNet::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if sources.is_empty() {
            return Err(InvalidArgs::new("RemoteAddr requires at least one address"));
        }
        Ok(Box::new(RemoteAddrPredicate { sources }))
    }
}
