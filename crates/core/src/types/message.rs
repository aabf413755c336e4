//! Wire frames and authorization outcomes

/// Status reported by the terminal on approval
pub const STATUS_APPROVED: &str = "APPROVED";

/// Status used for every non-approved outcome
pub const STATUS_DECLINED: &str = "DECLINED";

/// Decline reason when the terminal link cannot be established
pub const REASON_CANNOT_CONNECT: &str = "CANNOT CONNECT";

/// Decline reason when the terminal does not answer in time
pub const REASON_TIMEOUT: &str = "TIMEOUT";

/// One wire line split into positional fields
///
/// Fields carry meaning by index, determined by the message kind. The last
/// field retains any terminator the peer sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    fields: Vec<String>,
}

impl Frame {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Field at `index`, or None past the end
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a handshake reply: exactly `HELLO|TERM|<version>`
    ///
    /// The version field is not checked beyond being present.
    pub fn is_handshake_reply(&self) -> bool {
        self.fields.len() == 3 && self.fields[0] == "HELLO" && self.fields[1] == "TERM"
    }
}

/// Outcome of one authorization attempt
///
/// `reason` is populated only when `status` is not `APPROVED`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub status: String,
    pub reason: String,
}

impl AuthResult {
    /// Approved outcome with an empty reason
    pub fn approved() -> Self {
        Self {
            status: STATUS_APPROVED.to_string(),
            reason: String::new(),
        }
    }

    /// Declined outcome with the given reason
    pub fn declined(reason: &str) -> Self {
        Self {
            status: STATUS_DECLINED.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == STATUS_APPROVED
    }

    /// Interpret a reply frame from the terminal
    ///
    /// `status` comes from field 0 and `reason` from field 1, both stripped
    /// of trailing whitespace (the wire keeps the newline on the last
    /// field; the business value does not). A decline reply should carry a
    /// reason field; one without it is tolerated with an empty reason.
    pub fn from_frame(frame: &Frame) -> Self {
        let status = frame.field(0).unwrap_or_default().trim_end().to_string();
        if status == STATUS_APPROVED {
            return Self::approved();
        }

        let reason = match frame.field(1) {
            Some(reason) => reason.trim_end().to_string(),
            None => {
                tracing::warn!(%status, "decline reply carries no reason field");
                String::new()
            }
        };

        Self { status, reason }
    }
}

/// One persisted authorization outcome
///
/// Rows are append-only; insertion order is recency order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub amount: String,
    pub status: String,
    pub reason: String,
}

impl LedgerEntry {
    pub fn new(amount: &str, status: &str, reason: &str) -> Self {
        Self {
            amount: amount.to_string(),
            status: status.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Entry for the outcome of authorizing `amount`
    pub fn from_result(amount: &str, result: &AuthResult) -> Self {
        Self::new(amount, &result.status, &result.reason)
    }
}
