/// The default endpoint format for the PWMS route listing service
pub const DEFAULT_ROUTES_SERVICE_URL_FORMAT: &str =
    "https://pwms.com.br/backends/invoices-v3/public/buscarRotaGeraisEdicaoV2?data=$date";
pub const DEFAULT_ROUTES_SERVICE_URL_REPLACE_TOKEN: &str = "$date";

/// The default endpoint for the PWMS photo upload service
pub const DEFAULT_PHOTO_SERVICE_URL: &str =
    "https://pwms.com.br/backends/invoices-v3/public/uploadFotoEndereco";

/// The multipart field name the photo upload service expects
pub const PHOTO_PART_NAME: &str = "file";

/// The file name reported for an uploaded photo when the caller gives none
pub const DEFAULT_PHOTO_FILE_NAME: &str = "image.jpg";

/// The content type reported for an uploaded photo when the caller gives none
pub const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";
