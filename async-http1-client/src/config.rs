use std::time::Duration;

//
//
//
const READ_TIMEOUT: Duration = Duration::from_secs(5);
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);
const BUF_CAPACITY: usize = 8 * 1024;
const MAX_RESPONSE_LEN: usize = 8 * 1024 * 1024;

//
//
//
#[derive(Debug, Clone)]
pub struct ClientConfig {
    read_timeout: Duration,
    write_timeout: Duration,
    buf_capacity: usize,
    max_response_len: usize,
}
impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            read_timeout: READ_TIMEOUT,
            write_timeout: WRITE_TIMEOUT,
            buf_capacity: BUF_CAPACITY,
            max_response_len: MAX_RESPONSE_LEN,
        }
    }
}
impl ClientConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Applies to every single read, not to the whole response.
    pub fn set_read_timeout(&mut self, dur: Duration) -> &mut Self {
        self.read_timeout = dur;
        self
    }
    pub fn get_read_timeout(&self) -> Duration {
        self.read_timeout
    }
    pub fn set_write_timeout(&mut self, dur: Duration) -> &mut Self {
        self.write_timeout = dur;
        self
    }
    pub fn get_write_timeout(&self) -> Duration {
        self.write_timeout
    }
    pub fn set_buf_capacity(&mut self, value: usize) -> &mut Self {
        self.buf_capacity = value.max(1);
        self
    }
    pub fn get_buf_capacity(&self) -> usize {
        self.buf_capacity
    }
    pub fn set_max_response_len(&mut self, value: usize) -> &mut Self {
        self.max_response_len = value;
        self
    }
    pub fn get_max_response_len(&self) -> usize {
        self.max_response_len
    }
}
