//! Per-tool outcome policy.
//!
//! The tools do not agree on how failures are reported: `get-order-info`
//! flags them with `isError`, the others return the same information as
//! plain text. This table keeps that difference in one place.

/// How a successful backend payload is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessRendering {
    /// No text blocks; the payload, wrapped into an array when it is a
    /// single object, goes into `structuredContent`.
    StructuredList,

    /// One text block holding the compact JSON payload.
    CompactText,

    /// One text block holding the payload pretty-printed with 2-space indent.
    PrettyText,
}

/// Outcome handling for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolPolicy {
    /// Set `isError` on every failure envelope.
    pub flag_failures: bool,

    /// Subject for the 404 message, `"{subject} {id} not found."`.
    /// `None` reports a 404 like any other HTTP status.
    pub not_found: Option<&'static str>,

    /// Prefix for non-2xx statuses, `"{prefix} {id}: {status} {reason}"`.
    pub http_error: &'static str,

    /// Prefix for transport failures, `"{prefix}: {message}"`.
    pub transport_error: &'static str,

    pub success: SuccessRendering,
}

pub const ORDER_INFO: ToolPolicy = ToolPolicy {
    flag_failures: true,
    not_found: Some("Order"),
    http_error: "Error fetching order",
    transport_error: "Failed to fetch order information",
    success: SuccessRendering::StructuredList,
};

pub const ORDER_OVERVIEW: ToolPolicy = ToolPolicy {
    flag_failures: false,
    not_found: Some("Order overview for"),
    http_error: "Error fetching order overview",
    transport_error: "Failed to fetch order overview",
    success: SuccessRendering::StructuredList,
};

pub const ORDER_EMAIL: ToolPolicy = ToolPolicy {
    flag_failures: false,
    not_found: Some("Order"),
    http_error: "Error fetching order email",
    transport_error: "Failed to fetch order email",
    success: SuccessRendering::CompactText,
};

pub const PRODUCTS: ToolPolicy = ToolPolicy {
    flag_failures: false,
    not_found: None,
    http_error: "Error fetching products",
    transport_error: "Failed to fetch product information",
    success: SuccessRendering::PrettyText,
};

/// Tool name to policy.
pub static POLICIES: [(&str, ToolPolicy); 4] = [
    ("get-order-info", ORDER_INFO),
    ("get-order-overview", ORDER_OVERVIEW),
    ("get-order-email", ORDER_EMAIL),
    ("get-products", PRODUCTS),
];

/// Look up the policy registered for a tool name.
pub fn policy_for(tool: &str) -> Option<&'static ToolPolicy> {
    POLICIES
        .iter()
        .find(|(name, _)| *name == tool)
        .map(|(_, policy)| policy)
}
