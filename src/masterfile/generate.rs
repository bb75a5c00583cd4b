//! `$GENERATE` range parsing and `$`/`${offset,width,base}` template
//! expansion (spec §4.7). The `n`/`N` bases are nibble-reversed,
//! little-endian-per-nibble labels used for IP6 reverse zones (RFC
//! 2317-style classless delegation templates generalized to IPv6).

/// Parses `start-stop[/step]`, normalizing `step`'s sign to match the
/// direction from `start` to `stop`.
pub(crate) fn parse_range(text: &str) -> Result<(i64, i64, i64), String> {
    let (range, step_text) = match text.split_once('/') {
        Some((r, s)) => (r, Some(s)),
        None => (text, None),
    };
    let (start_text, stop_text) = range
        .split_once('-')
        .ok_or_else(|| format!("$GENERATE range must be start-stop: {text:?}"))?;
    let start: i64 = start_text
        .trim()
        .parse()
        .map_err(|_| format!("invalid $GENERATE start: {text:?}"))?;
    let stop: i64 = stop_text
        .trim()
        .parse()
        .map_err(|_| format!("invalid $GENERATE stop: {text:?}"))?;
    let step: i64 = match step_text {
        Some(s) => s
            .trim()
            .parse()
            .map_err(|_| format!("invalid $GENERATE step: {text:?}"))?,
        None => 1,
    };
    if step == 0 {
        return Err(format!("$GENERATE step cannot be zero: {text:?}"));
    }
    let step = if start <= stop { step.abs() } else { -step.abs() };
    Ok((start, stop, step))
}

/// Expands every `$`/`${...}` occurrence in `template` for iteration
/// value `i`. A literal `$` is written as `$$`.
pub(crate) fn expand(template: &str, i: i64) -> Result<String, String> {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::new();
    let mut pos = 0;
    while pos < chars.len() {
        if chars[pos] != '$' {
            out.push(chars[pos]);
            pos += 1;
            continue;
        }
        pos += 1;
        match chars.get(pos) {
            None => {
                out.push('$');
                break;
            }
            Some('$') => {
                out.push('$');
                pos += 1;
            }
            Some('{') => {
                let close = chars[pos..]
                    .iter()
                    .position(|&c| c == '}')
                    .map(|o| pos + o)
                    .ok_or_else(|| format!("unterminated \"${{...}}\" in $GENERATE template: {template:?}"))?;
                let spec: String = chars[pos + 1..close].iter().collect();
                out.push_str(&expand_braced(&spec, i)?);
                pos = close + 1;
            }
            Some(_) => {
                out.push_str(&i.to_string());
            }
        }
    }
    Ok(out)
}

fn expand_braced(spec: &str, i: i64) -> Result<String, String> {
    let parts: Vec<&str> = spec.split(',').collect();
    let offset: i64 = match parts.first() {
        Some(s) if !s.trim().is_empty() => s
            .trim()
            .parse()
            .map_err(|_| format!("invalid $GENERATE offset: {spec:?}"))?,
        _ => 0,
    };
    let width: usize = match parts.get(1) {
        Some(s) if !s.trim().is_empty() => s
            .trim()
            .parse()
            .map_err(|_| format!("invalid $GENERATE width: {spec:?}"))?,
        _ => 0,
    };
    let base = parts.get(2).map(|s| s.trim()).filter(|s| !s.is_empty()).unwrap_or("d");
    let value = i + offset;
    format_value(value, width, base).map_err(|()| format!("unknown $GENERATE base in {spec:?}"))
}

fn format_value(value: i64, width: usize, base: &str) -> Result<String, ()> {
    Ok(match base {
        "d" => pad(&value.to_string(), width, '0'),
        "o" => pad(&format!("{:o}", value), width, '0'),
        "x" => pad(&format!("{:x}", value), width, '0'),
        "X" => pad(&format!("{:X}", value), width, '0'),
        "n" | "N" => nibble_reversed(value, width, base == "N"),
        _ => return Err(()),
    })
}

fn pad(s: &str, width: usize, fill: char) -> String {
    if s.len() >= width {
        s.to_string()
    } else {
        let mut out = String::with_capacity(width);
        for _ in 0..(width - s.len()) {
            out.push(fill);
        }
        out.push_str(s);
        out
    }
}

/// Nibble-reversed dotted label form (`4.3.2.1` for `0x1234`), the
/// shape `$GENERATE` templates need for IP6 reverse-zone delegations.
fn nibble_reversed(value: i64, width: usize, upper: bool) -> String {
    let digits = if width == 0 { 32 } else { width };
    let mask = if digits >= 16 { u64::MAX } else { (1u64 << (digits * 4)) - 1 };
    let v = (value as u64) & mask;
    let hex = format!("{:0width$x}", v, width = digits);
    let hex = if upper { hex.to_ascii_uppercase() } else { hex };
    hex.chars().rev().map(|c| c.to_string()).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_range() {
        assert_eq!(parse_range("1-5").unwrap(), (1, 5, 1));
        assert_eq!(parse_range("5-1").unwrap(), (5, 1, -1));
        assert_eq!(parse_range("0-10/2").unwrap(), (0, 10, 2));
    }

    #[test]
    fn expands_bare_dollar() {
        assert_eq!(expand("host$", 7).unwrap(), "host7");
        assert_eq!(expand("a$$b", 7).unwrap(), "a$b");
    }

    #[test]
    fn expands_offset_width_base() {
        assert_eq!(expand("${0,3,d}", 5).unwrap(), "005");
        assert_eq!(expand("${1,0,x}", 15).unwrap(), "10");
    }

    #[test]
    fn nibble_reversed_form() {
        let out = expand("${0,2,n}", 0x12).unwrap();
        assert_eq!(out, "2.1");
    }
}
