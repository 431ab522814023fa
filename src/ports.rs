use anyhow::{bail, Context, Result};

/// Parse a comma separated port specification into the list of ports to scan.
///
/// Supported tokens:
/// - single port number: `80`
/// - half-open range: `8000-8003` expands to 8000, 8001, 8002 (the upper bound is excluded)
///
/// Order is preserved and duplicates are kept. A range whose lower bound is not below
/// its upper bound contributes nothing.
pub fn parse_port_spec(s: &str) -> Result<Vec<u16>> {
    let mut out: Vec<u16> = Vec::new();

    for raw in s.split(',') {
        let token = raw.trim();
        if token.is_empty() {
            bail!("empty entry in port list {s:?}");
        }

        if let Some((a, b)) = token.split_once('-') {
            let low = parse_port_str(a.trim())
                .with_context(|| format!("invalid start in range {token:?}"))?;
            let high = parse_port_str(b.trim())
                .with_context(|| format!("invalid end in range {token:?}"))?;
            out.extend(low..high);
            continue;
        }

        let p = parse_port_str(token).with_context(|| format!("invalid port value {token:?}"))?;
        out.push(p);
    }

    Ok(out)
}

fn parse_port_str(s: &str) -> Result<u16> {
    let val: u32 = s.parse::<u32>().map_err(|e| anyhow::anyhow!(e))?;
    if val == 0 || val > 65535 {
        bail!("port out of range: {val}");
    }
    Ok(val as u16)
}
