// Domain layer - Plain dashboard documents, no I/O
pub mod dashboard;
pub mod template;
pub mod widget;
