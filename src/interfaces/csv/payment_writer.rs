use crate::domain::payment::Payment;
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 4] = ["payment_id", "amount", "payment_method", "status"];

/// Writes a payment snapshot as CSV.
///
/// The header `payment_id,amount,payment_method,status` is always emitted, even
/// for an empty snapshot.
pub struct PaymentWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    pub fn write_payments<I>(&mut self, payments: I) -> Result<()>
    where
        I: IntoIterator<Item = Payment>,
    {
        self.writer.write_record(HEADER)?;
        for payment in payments {
            self.writer.serialize(payment)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
