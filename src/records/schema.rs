//! Column names of the shelter export and of the columns the pipeline derives.

pub const FECHA_INGRESO: &str = "Fecha Ingreso";
pub const FECHA_EGRESO: &str = "Fecha Egreso";
pub const DONDE_SE_ENCONTRO: &str = "Donde se encontró";
pub const NOMBRE: &str = "Nombre";
pub const SEXO_Y_ESTADO_INGRESO: &str = "Sexo y estado Ingreso";
pub const SEXO_Y_ESTADO_EGRESO: &str = "Sexo y estado Egreso";
pub const COLOR: &str = "Color";
pub const RAZA: &str = "Raza";
pub const TIPO_DE_ANIMAL: &str = "Tipo de Animal";
pub const CONDICION_DE_INGRESO: &str = "Condición de ingreso";
pub const FORMA_DE_EGRESO: &str = "Forma de egreso";

pub const SEXO_INGRESO: &str = "Sexo Ingreso";
pub const ESTADO_REPRODUCTIVO_INGRESO: &str = "Estado Reproductivo Ingreso";
pub const SEXO_EGRESO: &str = "Sexo Egreso";
pub const ESTADO_REPRODUCTIVO_EGRESO: &str = "Estado Reproductivo Egreso";
pub const DATOS_FALTANTES: &str = "Datos Faltantes";

/// Columns every raw export must carry (after header trimming).
pub const REQUIRED_COLUMNS: [&str; 11] = [
    FECHA_INGRESO,
    FECHA_EGRESO,
    DONDE_SE_ENCONTRO,
    NOMBRE,
    SEXO_Y_ESTADO_INGRESO,
    SEXO_Y_ESTADO_EGRESO,
    COLOR,
    RAZA,
    TIPO_DE_ANIMAL,
    CONDICION_DE_INGRESO,
    FORMA_DE_EGRESO,
];

/// Columns added by cleaning, in the order they are appended.
pub const DERIVED_COLUMNS: [&str; 5] = [
    SEXO_INGRESO,
    ESTADO_REPRODUCTIVO_INGRESO,
    SEXO_EGRESO,
    ESTADO_REPRODUCTIVO_EGRESO,
    DATOS_FALTANTES,
];

/// Timestamp layout used by the export, e.g. `03/15/2023 02:30:00 PM`.
pub const SOURCE_DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Layout dates are rendered with once cleaned, e.g. `15/03/2023`.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

pub const NAME_PLACEHOLDER: &str = "Sin Nombre";
pub const UNKNOWN: &str = "Desconocido";

/// Field values the loader reads as missing rather than as text.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];
