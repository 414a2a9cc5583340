mod envelope;
mod filter;
mod lfo;
mod voice;

pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use lfo::bench_lfo;
pub use voice::bench_voice;
