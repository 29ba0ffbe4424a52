use coap_lite::{CoapOption, Packet};
use tinyvec::ArrayVec;

use crate::*;

fn everything() -> VecMessage {
  let mut msg = VecMessage::new(Type::Con, Code::POST, Id(0xBEEF));
  msg.token = Some(vec![1, 2, 3, 4, 5, 6, 7, 8]);
  msg.uri_path = Some(b"sensors/temp/0".to_vec());
  msg.set_format(ContentFormat::Cbor).unwrap();
  msg.payload.0 = b"{\"c\": 21.5}".to_vec();

  let opts = msg.opts_mut();
  opts.uri_host = Some(b"coap.example".to_vec());
  opts.etag = Some(b"abcdefgh&x".to_vec());
  opts.observe = Some(Observe::Requested);
  opts.set_uri_port(5683).unwrap();
  opts.location_path = Some(b"a/b".to_vec());
  opts.set_max_age(60).unwrap();
  opts.uri_query = Some(b"unit=c&precise".to_vec());
  opts.accept = Some(vec![50]);
  opts.location_query = Some(b"q=1".to_vec());
  opts.set_block2(Block::new(64, 2, false)).unwrap();
  opts.set_block1(Block::new(1024, 700, true)).unwrap();
  opts.set_size2(1 << 20).unwrap();
  opts.proxy_uri = Some([b"coap://proxy/".as_ref(), &[b'p'; 400]].concat());
  opts.set_size1(0).unwrap();

  msg
}

fn samples() -> Vec<VecMessage> {
  let mut samples = vec![VecMessage::new(Type::Ack, Code::CONTENT, Id(12)),
                         VecMessage::new(Type::Reset, Code::EMPTY, Id(3)),
                         everything()];

  let mut msg = VecMessage::new(Type::Non, Code::CONTENT, Id(2));
  msg.opts_mut().observe = Some(Observe::Value(vec![0x2A]));
  samples.push(msg);

  let mut msg = VecMessage::new(Type::Non, Code::GET, Id(1));
  msg.opts_mut().observe = Some(Observe::Value(vec![0x01, 0x00, 0x00]));
  msg.opts_mut().size1 = Some(vec![1, 2, 3, 4]);
  samples.push(msg);

  let mut msg = VecMessage::new(Type::Con, Code::INTERNAL_SERVER_ERROR, Id(u16::MAX));
  msg.token = Some(vec![0]);
  msg.uri_path = Some(vec![]);
  msg.payload.0 = vec![0xFF; 300];
  samples.push(msg);

  samples
}

#[test]
fn parse_inverts_build() {
  samples().into_iter().for_each(|msg| {
                         let bytes: Vec<u8> = msg.try_into_bytes().unwrap();
                         assert_eq!(parse::<Vec<u8>>(&bytes), Ok(msg));
                       });
}

#[test]
fn build_writes_what_calculate_size_promises() {
  samples().into_iter().for_each(|msg| {
                         [0u16, 16, 64, 1024].into_iter().for_each(|limit| {
                                                               let size = calculate_size(&msg, limit).unwrap();
                                                               let mut buf = vec![0xAA; size + 8];
                                                               assert_eq!(build(&mut buf, &msg, limit), Ok(size));
                                                             });
                       });
}

#[test]
fn build_is_deterministic() {
  let msg = everything();
  let a: Vec<u8> = msg.try_into_bytes().unwrap();
  let b: Vec<u8> = msg.try_into_bytes().unwrap();
  assert_eq!(a, b);
}

/// Absolute number of every option occurrence in a serialized message
fn option_numbers(bytes: &[u8], tkl: usize) -> Vec<u32> {
  let mut cur = toad_cursor::Cursor::new(&bytes[4 + tkl..]);
  let mut number = 0;
  let mut numbers = vec![];
  let err = OptParseError::eof();

  while let Some(head) = cur.next().filter(|b| *b != 0xFF) {
    number += opt::parse_opt_len_or_delta(head >> 4, &mut cur, err).unwrap();
    let len = opt::parse_opt_len_or_delta(head & 0xF, &mut cur, err).unwrap();
    cur.take_exact(len as usize).unwrap();
    numbers.push(number);
  }

  numbers
}

#[test]
fn options_ascend_on_the_wire() {
  let bytes: Vec<u8> = everything().try_into_bytes().unwrap();
  let numbers = option_numbers(&bytes, 8);

  assert!(numbers.windows(2).all(|w| w[0] <= w[1]));

  let mut distinct = numbers.clone();
  distinct.dedup();
  assert_eq!(distinct,
             vec![3, 4, 6, 7, 8, 11, 12, 14, 15, 17, 20, 23, 27, 28, 35, 60]);
}

#[test]
fn heapless_round_trip() {
  let mut msg = ArrayVecMessage::<16>::new(Type::Con, Code::PUT, Id(4));
  msg.uri_path = Some(ArrayVec::from_iter(*b"a/b/c"));
  msg.opts_mut().uri_query = Some(ArrayVec::from_iter(*b"x&y"));
  msg.payload.0 = ArrayVec::from_iter(*b"hello");

  let bytes: ArrayVec<[u8; 64]> = msg.try_into_bytes().unwrap();
  assert_eq!(parse::<ArrayVec<[u8; 16]>>(&bytes), Ok(msg));
}

#[test]
fn blockwise_sends_the_first_block() {
  let mut msg = VecMessage::new(Type::Ack, Code::CONTENT, Id(9));
  msg.payload.0 = (0..=255).collect();

  let mut buf = vec![0; calculate_size(&msg, 64).unwrap()];
  build(&mut buf, &msg, 64).unwrap();

  let sent = parse::<Vec<u8>>(&buf).unwrap();
  let opts = sent.opts.as_ref().unwrap();
  assert_eq!(sent.payload.0, (0..64).collect::<Vec<u8>>());
  assert_eq!(opts.block2_value(), Some(Block::new(64, 0, true)));
  assert_eq!(opts.size2_bytes(), Some(256));
  assert_eq!(opts.block1, None);
  assert_eq!(opts.size1, None);
}

#[test]
fn first_block_announces_the_chunk_it_carries() {
  let mut rsp = VecMessage::new(Type::Ack, Code::CONTENT, Id(1));
  rsp.payload.0 = vec![0xAB; 5000];

  let mut req = VecMessage::new(Type::Con, Code::PUT, Id(2));
  req.payload.0 = vec![0xCD; 5000];

  [16u16, 32, 64, 128, 256, 512, 1024].into_iter().for_each(|limit| {
    let block = |msg: &VecMessage| {
      let mut buf = vec![0; calculate_size(msg, limit).unwrap()];
      build(&mut buf, msg, limit).unwrap();
      let sent = parse::<Vec<u8>>(&buf).unwrap();
      let opts = sent.opts.as_ref().unwrap();
      (opts.block1_value().or(opts.block2_value()).unwrap(), sent.payload.0.len())
    };

    let (block2, sent) = block(&rsp);
    assert_eq!(block2.size() as usize, sent);
    assert_eq!(sent, limit as usize);

    let (block1, sent) = block(&req);
    assert_eq!(block1.size() as usize, sent);
    assert_eq!(sent, limit as usize);
  });

  [1u16, 100, 2048].into_iter().for_each(|limit| {
                                 let mut buf = vec![0xEE; 8192];
                                 assert_eq!(build(&mut buf, &rsp, limit),
                                            Err(MessageToBytesError::InvalidBlockwiseLimit(limit)));
                                 assert!(buf.iter().all(|b| *b == 0xEE));
                               });
}

#[test]
fn empty_observe_value_is_not_mistaken_for_registration() {
  let mut msg = VecMessage::new(Type::Non, Code::CONTENT, Id(5));
  msg.opts_mut().observe = Some(Observe::Value(vec![]));

  assert_eq!(msg.try_into_bytes::<Vec<u8>>(),
             Err(MessageToBytesError::InvalidOptionLength { number: OptNumber(6),
                                                            len: 0 }));

  msg.opts_mut().observe = Some(Observe::Value(vec![7]));
  let bytes: Vec<u8> = msg.try_into_bytes().unwrap();
  assert_eq!(parse::<Vec<u8>>(&bytes), Ok(msg));
}

#[test]
fn coap_lite_reads_what_we_write() {
  let msg = everything();
  let bytes: Vec<u8> = msg.try_into_bytes().unwrap();

  let packet = Packet::from_bytes(&bytes).unwrap();
  assert_eq!(packet.header.message_id, 0xBEEF);
  assert_eq!(packet.payload, msg.payload.0);

  let path = packet.get_option(CoapOption::UriPath)
                   .unwrap()
                   .iter()
                   .cloned()
                   .collect::<Vec<_>>();
  assert_eq!(path, vec![b"sensors".to_vec(), b"temp".to_vec(), b"0".to_vec()]);

  let query = packet.get_option(CoapOption::UriQuery)
                    .unwrap()
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>();
  assert_eq!(query, vec![b"unit=c".to_vec(), b"precise".to_vec()]);

  assert_eq!(packet.to_bytes().unwrap(), bytes);
}

#[test]
fn we_read_what_coap_lite_writes() {
  let mut packet = Packet::new();
  packet.header.message_id = 77;
  packet.add_option(CoapOption::UriPath, b"a".to_vec());
  packet.add_option(CoapOption::UriPath, b"bc".to_vec());
  packet.add_option(CoapOption::UriQuery, b"k=v".to_vec());
  packet.payload = b"hi".to_vec();

  let msg = parse::<Vec<u8>>(&packet.to_bytes().unwrap()).unwrap();
  assert_eq!(msg.status, Status::Ok);
  assert_eq!(msg.id, Id(77));
  assert_eq!(msg.uri_path, Some(b"a/bc".to_vec()));
  assert_eq!(msg.opts.unwrap().uri_query, Some(b"k=v".to_vec()));
  assert_eq!(msg.payload.0, b"hi".to_vec());
}
