use std::io::{Cursor, Write};

use tradematrix::source::baci::BaciArchive;
use zip::write::SimpleFileOptions;

pub const TRADE_CSV: &str = "BACI_TEST_Y2023.csv";
pub const COUNTRY_CSV: &str = "country_codes_TEST.csv";

// Padded the way CEPII pads the real files, including an NA quantity and a second product.
pub const TRADE: &str = "t,i,j,k,v,q
2023,         842,         156,440791,     270.331,     170.800
2023,         842,         251,440791,      50.000,      30.000
2023,         251,         842,440791,      20.000,      10.000
2023,         156,         826,440791,       4.000,          NA
2023,         826,         842,440791,      12.000,       8.000
2023,         842,         156,440792,     999.000,     999.000
2023,         384,         251,440791,       2.000,       1.000
";

pub const COUNTRIES: &str = "country_code,country_name,country_iso2,country_iso3
156,China,CN,CHN
251,France,FR,FRA
384,CÃ´te d'Ivoire,CI,CIV
826,United Kingdom,GB,GBR
842,USA,US,USA
";

pub fn archive(trade: &str, countries: &str) -> BaciArchive<Cursor<Vec<u8>>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(TRADE_CSV, SimpleFileOptions::default())
        .unwrap();
    writer.write_all(trade.as_bytes()).unwrap();
    writer
        .start_file(COUNTRY_CSV, SimpleFileOptions::default())
        .unwrap();
    writer.write_all(countries.as_bytes()).unwrap();
    let mut cursor = writer.finish().unwrap();
    cursor.set_position(0);
    BaciArchive::from_reader(cursor, TRADE_CSV, COUNTRY_CSV).unwrap()
}
