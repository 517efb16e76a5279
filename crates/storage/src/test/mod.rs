mod chunk_test;
mod layout_test;
