/* 📖 # What is the Platform Abstraction Layer?

The PAL hides the process's contact points with the operating system (reading static
assets, listening on a TCP port) behind the `Pal` trait. RealPal talks to std::fs and
tiny_http; MockPal keeps files in memory and lets tests push requests straight into a
registered HttpService.
*/

mod file_path;
pub mod http;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle, ReadSeek};
