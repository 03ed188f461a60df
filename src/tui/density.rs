//! Vertical spacing that scales with the available height.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// Fewer than 30 rows.
    Compact,
    /// 30 to 49 rows.
    Comfortable,
    /// 50 rows and up.
    Spacious,
}

impl Density {
    pub fn for_height(height: usize) -> Self {
        match height {
            0..=29 => Density::Compact,
            30..=49 => Density::Comfortable,
            _ => Density::Spacious,
        }
    }

    /// Joiner placed between stacked content blocks.
    pub fn separator(self) -> &'static str {
        match self {
            Density::Compact => "\n",
            Density::Comfortable => "\n\n",
            Density::Spacious => "\n\n\n",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(Density::for_height(0), Density::Compact);
        assert_eq!(Density::for_height(29), Density::Compact);
        assert_eq!(Density::for_height(30), Density::Comfortable);
        assert_eq!(Density::for_height(49), Density::Comfortable);
        assert_eq!(Density::for_height(50), Density::Spacious);
    }

    #[test]
    fn separators_grow() {
        assert_eq!(Density::Compact.separator(), "\n");
        assert_eq!(Density::Spacious.separator().len(), 3);
    }
}
