#![allow(dead_code)]

use ticketry_canonical::{Bytes32, Identity};
use ticketry_core::{identity_of, signing_key_from_seed, NewPromoter, NewUser, NewVenue, SigningKey};

pub fn make_key(seed: &str) -> (SigningKey, Identity) {
    let key = signing_key_from_seed(seed.as_bytes()).unwrap();
    let identity = identity_of(key.verifying_key());
    (key, identity)
}

pub fn make_user() -> NewUser {
    NewUser {
        display_name: Bytes32::parse("Raul Ziranda Gonzalez").unwrap(),
        age: 29,
        email: Bytes32::parse("raulzi.dev@gmail.com").unwrap(),
        phone: "4341150678".into(),
        photo_hash: "mtwirsqawjuoloq2gvtyug2tc3jbf5htm2zeo4rsknfiv3fdp46a".into(),
        voiceprint_hash: "mtwirsqawjuoloq2gvtyug2tc3jbf5htm2zeo4rsknfiv3fdp46a".into(),
        faceprint_hash: "QmTtDqWzo179ujTXU7pf2PodLNjpcpQQCXhkiQXi6wZvKd".into(),
    }
}

pub fn make_promoter(identity: Identity) -> NewPromoter {
    NewPromoter {
        identity,
        display_name: Bytes32::parse("Live Nation").unwrap(),
        email: Bytes32::parse("promoter@gmail.com").unwrap(),
        phone: "5531143454".into(),
        website: "https://www.livenation.lat".into(),
        voiceprint_hash: "mtwirsqawjuoloq2gvtyug2tc3jbf5htm2zeo4rsknfiv3fdp46a".into(),
        faceprint_hash: "QmTtDqWzo179ujTXU7pf2PodLNjpcpQQCXhkiQXi6wZvKd".into(),
    }
}

pub fn make_venue(name: &str) -> NewVenue {
    NewVenue {
        name: Bytes32::parse(name).unwrap(),
        address: "Av. Paseo de la Reforma 50, Ciudad de Mexico".into(),
        capacity: 10_000,
        phone: "5552809250".into(),
        description: "Auditorio multiusos".into(),
        website: "https://www.auditorio.com.mx".into(),
        email: "contacto@auditorio.com.mx".into(),
    }
}
