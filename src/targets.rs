use anyhow::{bail, Context, Result};
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::net::{IpAddr, Ipv4Addr};

/// Widest networks we are willing to expand host by host.
const MIN_IPV4_PREFIX: u8 = 16;
const MIN_IPV6_PREFIX: u8 = 120;

/// Parse a comma separated host list.
///
/// Entries are trimmed and blank entries skipped. An entry containing `/` is read as a
/// CIDR and expanded to its host addresses; anything else (hostname or IP literal) is
/// passed through untouched and resolved at connect time.
pub fn parse_hosts(s: &str) -> Result<Vec<String>> {
    let mut hosts = Vec::new();
    for raw in s.split(',') {
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }
        if entry.contains('/') {
            let net: IpNet = entry
                .parse()
                .with_context(|| format!("invalid CIDR {entry:?}"))?;
            hosts.extend(expand_cidr_to_ips(net)?.into_iter().map(|ip| ip.to_string()));
        } else {
            hosts.push(entry.to_string());
        }
    }
    Ok(hosts)
}

/// Expand a CIDR into the individual addresses worth scanning.
///
/// For IPv4 prefixes up to /30 the network and broadcast addresses are skipped;
/// /31 and /32 keep every address. IPv4 networks wider than /16 and IPv6 networks
/// wider than /120 are rejected.
pub fn expand_cidr_to_ips(cidr: IpNet) -> Result<Vec<IpAddr>> {
    match cidr {
        IpNet::V4(n4) => {
            if n4.prefix_len() < MIN_IPV4_PREFIX {
                bail!("IPv4 network {n4} too large to expand (need /{MIN_IPV4_PREFIX} or narrower)");
            }
            Ok(expand_ipv4net_hosts(n4).into_iter().map(IpAddr::V4).collect())
        }
        IpNet::V6(n6) => {
            if n6.prefix_len() < MIN_IPV6_PREFIX {
                bail!("IPv6 network {n6} too large to expand (need /{MIN_IPV6_PREFIX} or narrower)");
            }
            Ok(expand_ipv6net_hosts(n6))
        }
    }
}

fn expand_ipv4net_hosts(net: Ipv4Net) -> Vec<Ipv4Addr> {
    let start = u32::from(net.network());
    let end = u32::from(net.broadcast());
    if net.prefix_len() >= 31 {
        return (start..=end).map(Ipv4Addr::from).collect();
    }
    (start + 1..end).map(Ipv4Addr::from).collect()
}

fn expand_ipv6net_hosts(net: Ipv6Net) -> Vec<IpAddr> {
    net.hosts().map(IpAddr::V6).collect()
}
