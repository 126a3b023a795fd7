use crate::RecordBatch;
use tabled::{Table, builder::Builder, settings};

/// Predefined output styles that map to `tabled` styles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TableStyleKind {
    #[default]
    Modern,
    Ascii,
    Plain,
}

impl TableStyleKind {
    fn apply(self, table: &mut Table) {
        match self {
            Self::Modern => table.with(settings::Style::modern()),
            Self::Ascii => table.with(settings::Style::ascii()),
            Self::Plain => table.with(settings::Style::empty()),
        };
    }
}

/// Render a `RecordBatch` into a human-friendly table string.
pub fn render_record_batch(batch: &RecordBatch, style: TableStyleKind) -> String {
    if batch.columns.is_empty() && batch.rows.is_empty() {
        return "<empty>".into();
    }

    let mut builder = Builder::default();
    if !batch.columns.is_empty() {
        builder.push_record(batch.columns.iter().cloned());
    }
    for row in &batch.rows {
        builder.push_record(row.iter().cloned());
    }

    let mut table = builder.build();
    style.apply(&mut table);
    table.to_string()
}

/// Split a batch into rendered pages of at most `page_size` rows. Every page
/// repeats the header row. An empty batch yields a single page.
pub fn paginate(batch: &RecordBatch, page_size: usize, style: TableStyleKind) -> Vec<String> {
    let page_size = page_size.max(1);
    if batch.rows.is_empty() {
        return vec![render_record_batch(batch, style)];
    }

    batch
        .rows
        .chunks(page_size)
        .map(|chunk| {
            let page = RecordBatch {
                columns: batch.columns.clone(),
                rows: chunk.to_vec(),
            };
            render_record_batch(&page, style)
        })
        .collect()
}
