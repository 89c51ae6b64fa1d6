pub mod quill;
