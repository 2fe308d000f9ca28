pub const SUPERSCRIPT: [&str; 10] = ["⁰", "¹", "²", "³", "⁴", "⁵", "⁶", "⁷", "⁸", "⁹"];

#[allow(unused)]
pub mod arrow {
    pub const UP: &str = "↑";
    pub const DOWN: &str = "↓";
    pub const LEFT: &str = "←";
    pub const RIGHT: &str = "→";
}

#[allow(unused)]
pub mod triangle {
    pub const UP_SMALL: &str = "▴";
    pub const DOWN_SMALL: &str = "▾";

    pub const UP: &str = "▲";
    pub const DOWN: &str = "▼";
}

/// Superscript digits for `n`, e.g. `12` -> `¹²`.
pub fn superscript(n: usize) -> String {
    n.to_string().bytes().map(|b| SUPERSCRIPT[(b - b'0') as usize]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superscript() {
        assert_eq!(superscript(0), "⁰");
        assert_eq!(superscript(7), "⁷");
        assert_eq!(superscript(12), "¹²");
    }
}
