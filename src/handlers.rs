pub mod ocr;
pub mod shopping_list;

pub use ocr::OcrHandler;
pub use shopping_list::ShoppingListHandler;
