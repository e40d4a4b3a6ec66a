pub mod coda;
pub mod io;
pub mod table;
