use std::io::{self, Write};
use std::path::Path;

use super::record::StepRecord;

/// Write an episode trace as CSV.
///
/// Columns: step, time, x, y, vx, vy, fuel, wind, thrust, reward, score,
///          landed, crashed
pub fn write_trajectory<W: Write>(writer: &mut W, records: &[StepRecord]) -> io::Result<()> {
    writeln!(writer, "step,time,x,y,vx,vy,fuel,wind,thrust,reward,score,landed,crashed")?;

    for r in records {
        writeln!(
            writer,
            "{},{:.4},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{},{:.4},{},{},{}",
            r.step,
            r.time,
            r.x, r.y,
            r.vx, r.vy,
            r.fuel,
            r.wind,
            u8::from(r.thrust),
            r.reward,
            r.score,
            u8::from(r.landed),
            u8::from(r.crashed),
        )?;
    }

    Ok(())
}

/// Write an episode trace to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, records: &[StepRecord]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, records)?;
    file.flush()
}
