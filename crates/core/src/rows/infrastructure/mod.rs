pub mod line_row_source;
