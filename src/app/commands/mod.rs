pub mod curate;
