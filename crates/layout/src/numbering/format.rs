//! Counter formatting for list markers and heading labels.

use folio_style::NumberingStyle;

const BULLETS: [&str; 3] = ["•", "◦", "▪"];

/// Formats `value` in the given style. `depth` picks the bullet character for nested bullet lists.
pub fn format_value(value: u32, depth: usize, style: NumberingStyle) -> String {
    match style {
        NumberingStyle::Decimal => value.to_string(),
        NumberingStyle::UpperRoman => int_to_upper_roman(value),
        NumberingStyle::LowerRoman => int_to_lower_roman(value),
        NumberingStyle::UpperAlpha => int_to_upper_alpha(value),
        NumberingStyle::LowerAlpha => int_to_lower_alpha(value),
        NumberingStyle::Bullet => BULLETS[depth % BULLETS.len()].to_string(),
        NumberingStyle::Labels | NumberingStyle::None => String::new(),
    }
}

pub fn int_to_lower_alpha(n: u32) -> String {
    if n == 0 {
        return String::new();
    }
    let mut s = String::new();
    let mut num = n - 1;
    loop {
        s.insert(0, (b'a' + (num % 26) as u8) as char);
        num /= 26;
        if num == 0 {
            break;
        }
        num -= 1;
    }
    s
}

pub fn int_to_upper_alpha(n: u32) -> String {
    int_to_lower_alpha(n).to_uppercase()
}

pub fn int_to_lower_roman(n: u32) -> String {
    const VALUES: [(u32, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut num = n;
    let mut result = String::new();
    for &(val, sym) in &VALUES {
        while num >= val {
            result.push_str(sym);
            num -= val;
        }
    }
    result
}

pub fn int_to_upper_roman(n: u32) -> String {
    int_to_lower_roman(n).to_uppercase()
}
