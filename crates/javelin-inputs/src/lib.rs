//! Source files as salsa inputs.

pub use line_index::{LineCol, LineIndex, TextSize};

#[salsa::input(debug)]
pub struct SourceFile {
    #[returns(ref)]
    pub path: camino::Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl SourceFile {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

impl SourceFile {
    /// Zero-based line and UTF-8 column of `offset`.
    pub fn line_col(self, db: &dyn salsa::Database, offset: TextSize) -> LineCol {
        self.line_index(db).line_col(offset)
    }
}

#[cfg(test)]
mod tests {
    use salsa::Setter as _;

    use super::*;

    #[test]
    fn line_index_follows_text_changes() {
        let mut db = salsa::DatabaseImpl::default();
        let file = SourceFile::new(&db, "A.java".into(), "class A {\n}\n".to_owned());
        assert_eq!(file.line_index(&db).line_col(TextSize::from(10)), LineCol { line: 1, col: 0 });

        file.set_text(&mut db).to("\n\nclass A {}\n".to_owned());
        assert_eq!(file.line_col(&db, TextSize::from(9)), LineCol { line: 2, col: 7 });
        assert_eq!(file.path(&db).as_str(), "A.java");
    }
}
