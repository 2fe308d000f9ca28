use crate::utils::symbols::triangle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    #[inline]
    pub fn toggle(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    /// Marker drawn next to the header that ordered a table.
    pub fn symbol(self) -> &'static str {
        match self {
            SortDir::Asc => triangle::UP_SMALL,
            SortDir::Desc => triangle::DOWN_SMALL,
        }
    }
}

/// Which column last ordered a table, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub col: usize,
    pub dir: SortDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(SortDir::default(), SortDir::Desc);
        assert_eq!(SortDir::Desc.toggle(), SortDir::Asc);
        assert_eq!(SortDir::Asc.toggle().toggle(), SortDir::Asc);
    }
}
