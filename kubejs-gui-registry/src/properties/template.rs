/// Positional substitution used by snippet templates.
///
/// `%s` takes the next argument, `%1$s` / `%2$s` pick one explicitly
/// (1-based) and `%%` is a literal percent sign. Missing arguments render as
/// nothing, unknown sequences are copied through.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(|a| a.len()).sum::<usize>());
    let mut next_arg = 0;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') => {
                chars.next();
                out.push_str(args.get(next_arg).copied().unwrap_or_default());
                next_arg += 1;
            }
            Some(digit) if digit.is_ascii_digit() => {
                let mut lookahead = chars.clone();
                let mut position = Some(0usize);
                while let Some(d) = lookahead.peek().and_then(|c| c.to_digit(10)) {
                    position = position
                        .and_then(|p| p.checked_mul(10))
                        .and_then(|p| p.checked_add(d as usize));
                    lookahead.next();
                }
                let position = position.filter(|p| *p > 0);
                if let (Some(position), Some('$'), Some('s')) =
                    (position, lookahead.next(), lookahead.next())
                {
                    chars = lookahead;
                    out.push_str(args.get(position - 1).copied().unwrap_or_default());
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
