pub mod run;
pub mod select;
pub mod simulate;
pub mod spread;
