use anyhow::{Context, Result, bail};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse a comma-separated seed list. Hex seeds take a `0x` prefix.
pub fn parse_seeds(s: &str) -> Result<Vec<u64>> {
    let seeds = split_csv(s)
        .iter()
        .map(|token| {
            let parsed = match token.strip_prefix("0x") {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => token.parse(),
            };
            parsed.with_context(|| format!("invalid seed '{token}'"))
        })
        .collect::<Result<Vec<u64>>>()?;
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}
