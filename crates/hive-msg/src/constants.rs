//! Fixed protocol-profile values stamped onto every outbound message.

/// Namespace of the hive message envelope.
pub const NS_MSG: &str = "http://www.i2b2.org/xsd/hive/msg/1.1/";
/// Namespace of ontology cell payloads.
pub const NS_ONT: &str = "http://www.i2b2.org/xsd/cell/ont/1.1/";
/// Namespace of hive patient data object payloads.
pub const NS_PDO: &str = "http://www.i2b2.org/xsd/hive/pdo/1.1/";
/// Namespace of CRC patient data object payloads.
pub const NS_CRC_PDO: &str = "http://www.i2b2.org/xsd/cell/crc/pdo/1.1/";
/// Namespace of CRC patient set management payloads.
pub const NS_CRC_PSM: &str = "http://www.i2b2.org/xsd/cell/crc/psm/1.1/";

/// Prefix bound to [`NS_MSG`].
pub const PREFIX_MSG: &str = "msgns";
/// Prefix bound to [`NS_PDO`].
pub const PREFIX_PDO: &str = "pdons";
/// Prefix bound to [`NS_ONT`].
pub const PREFIX_ONT: &str = "ontns";
/// Prefix bound to [`NS_CRC_PDO`].
pub const PREFIX_CRC_PDO: &str = "crcpdons";
/// Prefix bound to [`NS_CRC_PSM`].
pub const PREFIX_CRC_PSM: &str = "crcpsmns";

/// Namespace declarations carried by every request, in emission order.
pub const REQUEST_NAMESPACES: [(&str, &str); 5] = [
    (PREFIX_MSG, NS_MSG),
    (PREFIX_PDO, NS_PDO),
    (PREFIX_ONT, NS_ONT),
    (PREFIX_CRC_PDO, NS_CRC_PDO),
    (PREFIX_CRC_PSM, NS_CRC_PSM),
];

pub(crate) const HIVE_VERSION_COMPATIBLE: &str = "0.3";
pub(crate) const HL7_VERSION_COMPATIBLE: &str = "2.4";

pub(crate) const SENDING_APPLICATION_NAME: &str = "Hive Data Source";
pub(crate) const SENDING_APPLICATION_VERSION: &str = "0.2";
pub(crate) const SENDING_FACILITY_NAME: &str = "hive-datasource";
pub(crate) const RECEIVING_APPLICATION_NAME: &str = "i2b2 cell";
pub(crate) const RECEIVING_APPLICATION_VERSION: &str = "1.7";
pub(crate) const RECEIVING_FACILITY_NAME: &str = "i2b2 hive";

pub(crate) const MESSAGE_CODE: &str = "EQQ";
pub(crate) const EVENT_TYPE: &str = "Q04";
pub(crate) const MESSAGE_STRUCTURE: &str = "EQQ_Q04";

pub(crate) const INSTANCE_NUM: &str = "0";
pub(crate) const PROCESSING_ID: &str = "P";
pub(crate) const PROCESSING_MODE: &str = "I";
pub(crate) const ACCEPT_ACKNOWLEDGEMENT_TYPE: &str = "messageId";
pub(crate) const APPLICATION_ACKNOWLEDGEMENT_TYPE: &str = "";
pub(crate) const COUNTRY_CODE: &str = "CH";

/// Placeholder carried by credential and project fields until connection
/// details are applied.
pub const NOT_SET: &str = "NOT_SET";

/// Status type reported by the hive when a request completed.
pub const STATUS_DONE: &str = "DONE";
