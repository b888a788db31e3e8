pub mod list;
pub mod script;
pub mod send;

use hbc_core::Response;

/// Print a server response: payload and rows on stdout, errors on stderr
pub fn print_response(response: &Response) {
    if response.is_error() {
        eprintln!("{}", response.render());
    } else {
        println!("{}", response.render());
    }
}
