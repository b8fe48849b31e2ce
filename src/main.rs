use std::process::ExitCode;

fn main() -> ExitCode {
    match dsp_simulator::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
