//! Shared constants for the verification pipeline
//!

/// Base URL for the Gemini `generateContent` family of endpoints.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model used when none is given on the command line.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Receipts wider than this get downscaled before upload.
pub const MAX_IMAGE_WIDTH: u32 = 1024;

/// Timeout for the single API call, in seconds.
pub const REQUEST_TIMEOUT_SECONDS: u64 = 45;

/// MIME type sent alongside the inline image data.
pub const IMAGE_MIME_TYPE: &str = "image/png";

/// Instruction sent to the model with every receipt.
pub const ANALYSIS_PROMPT: &str = r#"You are a highly-attentive payment verification assistant. Your task is to analyze payment receipt screenshots to check for legitimacy.

INSTRUCTIONS:
1. Read all visible text, paying close attention to: Reference Number (Ref No), Amount Sent, Recipient, Sender, Date, and Time.
2. Critically assess the image for signs of digital manipulation. Look for: mismatched fonts, blurry areas, pixelation, and misaligned text.
3. Make a final recommendation.

DECISION CRITERIA:
- **APPROVED:** The receipt looks completely legitimate.
- **FLAGGED:** The receipt might be real, but something is suspicious (blurry text, odd alignment). Requires human review.
- **REJECTED:** The receipt is clearly fake (obvious digital editing, critical information missing).

Respond in this exact JSON format. Do not include any other text or markdown.
{
    "extracted_info": {
        "reference_number": "The 13-digit reference number you read, or 'Not Found'",
        "amount": "The amount you read, or 'Not Found'",
        "date": "The date and time you read, or 'Not Found'"
    },
    "verification_status": "APPROVED/FLAGGED/REJECTED",
    "reasoning": "A brief, specific explanation for your decision."
}
"#;
