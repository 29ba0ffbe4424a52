use sncoap_msg::*;
use tinyvec::ArrayVec;

/// Shape of a message to benchmark with.
///
/// Options are Uri-Path segments, so `opt_size` must be at most 255.
#[derive(Debug, PartialEq, PartialOrd, Ord, Eq)]
pub struct TestInput {
  pub tkl: u8,
  pub n_opts: usize,
  pub opt_size: usize,
  pub payload_size: usize,
}

impl TestInput {
  pub fn get_bytes(&self) -> Vec<u8> {
    self.get_alloc_message().try_into_bytes::<Vec<_>>().unwrap()
  }

  pub fn get_alloc_message(&self) -> VecMessage {
    let mut msg = VecMessage::new(Type::Non, Code::CONTENT, Id(1));
    msg.token = self.token().map(|t| t.to_vec());
    msg.uri_path = self.path().map(|p| p.collect());
    msg.payload = Payload(self.payload().collect());
    msg
  }

  pub fn get_no_alloc_message<const N: usize>(&self) -> ArrayVecMessage<N> {
    let mut msg = ArrayVecMessage::<N>::new(Type::Non, Code::CONTENT, Id(1));
    msg.token = self.token().map(|t| t.iter().copied().collect());
    msg.uri_path = self.path().map(|p| p.collect());
    msg.payload = Payload(self.payload().collect());
    msg
  }

  pub fn get_coap_lite_packet(&self) -> coap_lite::Packet {
    coap_lite::Packet::from_bytes(&self.get_bytes()).unwrap()
  }

  fn token(&self) -> Option<ArrayVec<[u8; 8]>> {
    match self.tkl {
      | 0 => None,
      | n => Some(core::iter::repeat(1u8).take(n as _).collect()),
    }
  }

  fn path(&self) -> Option<impl Iterator<Item = u8> + '_> {
    match self.n_opts {
      | 0 => None,
      | n => Some((0..n).flat_map(move |ix| {
                          let sep = if ix == 0 { None } else { Some(b'/') };
                          sep.into_iter()
                             .chain(core::iter::repeat(b'a').take(self.opt_size))
                        })),
    }
  }

  fn payload(&self) -> impl Iterator<Item = u8> {
    core::iter::repeat(1u8).take(self.payload_size)
  }
}

pub fn inputs() -> Vec<TestInput> {
  [(0, 0, 0, 0),
   (4, 4, 8, 16),
   (4, 4, 16, 16),
   (4, 8, 32, 16),
   (8, 8, 64, 16),
   (8, 8, 64, 32),
   (8, 8, 64, 128),
   (8, 16, 64, 128),
   (8, 16, 64, 512),
   (8, 16, 128, 512),
   (8, 16, 128, 2048),
   (8, 16, 255, 2048),
   (8, 16, 255, 4096)].into_iter()
                      .map(|(tkl, n_opts, opt_size, payload_size)| TestInput { tkl,
                                                                               n_opts,
                                                                               opt_size,
                                                                               payload_size })
                      .collect()
}
