mod bounded;
mod rendezvous;
mod unbounded;
