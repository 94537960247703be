use tagpull_types::MergedTable;

/// Forward-fill unset cells from the last populated cell above them.
///
/// At most `limit` consecutive cells are filled after each populated cell;
/// cells beyond that run stay unset. Value and status are filled together.
/// Leading unset cells are never filled.
pub fn forward_fill(table: &mut MergedTable, limit: usize) {
    if limit == 0 {
        return;
    }
    for column in &mut table.columns {
        let mut last = None;
        let mut run = 0usize;
        for cell in &mut column.cells {
            if let Some(c) = cell.as_ref() {
                last = Some(c.clone());
                run = 0;
            } else if run < limit
                && let Some(prev) = &last
            {
                *cell = Some(prev.clone());
                run += 1;
            }
        }
    }
}
