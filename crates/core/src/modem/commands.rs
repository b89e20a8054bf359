//! AT commands and expected tokens.

/// Liveness check
pub const AT: &str = "AT";

/// SMS text mode
pub const TEXT_MODE: &str = "AT+CMGF=1";

/// GSM character set
pub const CHARSET_GSM: &str = "AT+CSCS=\"GSM\"";

/// Route new-message indications to the terminal
pub const NEW_MESSAGE_INDICATION: &str = "AT+CNMI=1,2,0,0,0";

/// SIM PIN status
pub const SIM_STATUS: &str = "AT+CPIN?";

/// Network registration status
pub const REGISTRATION: &str = "AT+CREG?";

/// Signal quality report
pub const SIGNAL_QUALITY: &str = "AT+CSQ";

/// GNSS power on
pub const GNSS_POWER_ON: &str = "AT+CGNSPWR=1";

/// GNSS navigation information
pub const GNSS_INFO: &str = "AT+CGNSINF";

/// Prefix of the send-SMS command; the quoted number follows
pub const SEND_SMS_PREFIX: &str = "AT+CMGS=";

/// Terminates an SMS body (Ctrl+Z)
pub const CTRL_Z: u8 = 0x1A;

/// Command line terminator
pub const CRLF: &str = "\r\n";

/// Generic success token
pub const OK: &str = "OK";

/// Prompt for SMS body input
pub const SMS_PROMPT: &str = ">";

/// Token present in a successful send report
pub const SMS_SENT: &str = "+CMGS";

/// SIM ready token
pub const SIM_READY: &str = "READY";

/// Registered on home network
pub const REGISTERED_HOME: &str = "+CREG: 0,1";

/// Registered, roaming
pub const REGISTERED_ROAMING: &str = "+CREG: 0,5";

/// Signal quality reply tag
pub const CSQ_TAG: &str = "+CSQ:";
