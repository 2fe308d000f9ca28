mod page;
pub mod sort;
mod table;

pub use page::Page;
pub use table::Table;
#[cfg(test)]
pub use table::Cell;
