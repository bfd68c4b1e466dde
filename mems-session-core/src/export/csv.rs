use crate::models::sample::Sample;
use crate::processing::ledger::format_instant;

/// Fixed header row of `mems.csv`.
pub const CSV_HEADER: &str = "timestamp,gyro_x,gyro_y,gyro_z,accel_x,accel_y,accel_z";

/// Build `mems.csv` by pairing the two channels by position.
///
/// Row `i` holds gyroscope sample `i` (timestamp and axes) followed by the
/// axes of accelerometer sample `i`, or `0,0,0` when the accelerometer
/// delivered fewer samples. The row count always equals the gyroscope sample
/// count; extra accelerometer samples are dropped.
///
/// This is not a timestamp join. When the channels deliver at different
/// rates, row `i` pairs readings taken at increasingly different instants.
pub fn build_mems_csv(gyroscope: &[Sample], accelerometer: &[Sample]) -> String {
    let rows: Vec<String> = gyroscope
        .iter()
        .enumerate()
        .map(|(i, gyro)| {
            let (ax, ay, az) = accelerometer
                .get(i)
                .map(|accel| (accel.x, accel.y, accel.z))
                .unwrap_or((0.0, 0.0, 0.0));
            format!(
                "{},{},{},{},{},{},{}",
                format_instant(&gyro.timestamp),
                format_axis(gyro.x),
                format_axis(gyro.y),
                format_axis(gyro.z),
                format_axis(ax),
                format_axis(ay),
                format_axis(az)
            )
        })
        .collect();

    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 64);
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    csv.push_str(&rows.join("\n"));
    csv
}

/// Zero, negative zero and non-finite readings are all written as `0`.
fn format_axis(value: f64) -> String {
    if value.is_finite() && value != 0.0 {
        value.to_string()
    } else {
        "0".to_string()
    }
}
