use csv_core::{ReadFieldResult, WriteResult};

pub trait FromU32 {
    fn from_u32(src: u32) -> Self;
}

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl FromU32 for usize {
    #[inline(always)]
    fn from_u32(src: u32) -> Self {
        // Since the pointer width is guaranteed to be 32 or 64,
        // the following process always succeeds.
        unsafe { Self::try_from(src).unwrap_unchecked() }
    }
}

/// Splits a CSV row into fields, following the quoting rules of MeCab dictionaries.
pub fn parse_csv_row(row: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    let mut field = vec![];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        bytes = &bytes[nin..];
        field.extend_from_slice(&output[..nout]);
        match result {
            // The field is longer than the buffer.
            ReadFieldResult::OutputFull => continue,
            ReadFieldResult::Field { record_end } => {
                fields.push(String::from_utf8_lossy(&field).into_owned());
                field.clear();
                if record_end {
                    break;
                }
            }
            ReadFieldResult::InputEmpty | ReadFieldResult::End => {
                fields.push(String::from_utf8_lossy(&field).into_owned());
                break;
            }
        }
    }
    fields
}

/// Joins fields into a CSV row, quoting the fields that contain a comma or a quote.
///
/// Fields of the result are split back by [`parse_csv_row()`].
pub fn join_csv_row<S>(fields: &[S]) -> String
where
    S: AsRef<str>,
{
    let mut row = vec![];
    let mut output = [0; 4096];
    for (i, field) in fields.iter().enumerate() {
        if i != 0 {
            row.push(b',');
        }
        let mut data = field.as_ref().as_bytes();
        if data.is_empty() {
            continue;
        }
        let mut wtr = csv_core::Writer::new();
        loop {
            let (result, nin, nout) = wtr.field(data, &mut output);
            row.extend_from_slice(&output[..nout]);
            data = &data[nin..];
            if result == WriteResult::InputEmpty {
                break;
            }
        }
        let (_, nout) = wtr.finish(&mut output);
        row.extend_from_slice(&output[..nout]);
    }
    String::from_utf8_lossy(&row).into_owned()
}
