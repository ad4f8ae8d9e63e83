//! Prompts sent to the completion service.
//!
//! The deployment targets Japanese shoppers, so the instruction text is
//! Japanese. It asks for a bulleted list of item names with quantities when
//! the note gives them, and tells the model to drop headings such as
//! "買物リスト".

/// Instruction placed in front of the OCR text.
pub const SHOPPING_LIST_PROMPT: &str = "以下のテキストから、買い物リスト項目として適切な分を（商品名と数量があれば）を箇条書きにしてください。買物リスト などの分はいりません   出力例 商品名 個数など（記載あれば）";

/// Combine the fixed instruction with the text recognised in the photo.
pub fn build_shopping_list_prompt(ocr_text: &str) -> String {
    format!("{SHOPPING_LIST_PROMPT}\n\n{ocr_text}")
}
