use std::process::ExitCode;

fn main() -> ExitCode {
    match karber_ld50::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
